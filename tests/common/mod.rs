pub mod mock_clipboard;
pub mod mock_llm;
