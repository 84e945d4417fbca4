// src/morse/mod.rs  -  Code table, translator, timing, element encoder
pub mod encoder;
pub mod table;
pub mod text;
pub mod timing;

pub use encoder::{encode, Element};
pub use table::CodeTable;
pub use text::{DefaultCase, Translator, TranslatorConfig};
pub use timing::Timing;
