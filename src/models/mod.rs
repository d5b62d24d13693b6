pub mod loaders;
pub mod question;
pub mod schema;

pub use loaders::load_question_batch;
pub use question::{QuestionBatch, QuestionRecord, LEGACY_CELLS};
pub use schema::TableSchema;
