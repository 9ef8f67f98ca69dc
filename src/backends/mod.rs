pub mod groq;
pub mod openai;
