pub mod blob_store;
pub mod chrome_session;
pub mod ocr;
pub mod record_sink;
pub mod session;
pub mod wait;

pub use blob_store::{AzureBlobStore, BlobStore};
pub use chrome_session::ChromeSession;
pub use ocr::{OcrEngine, TesseractOcr};
pub use record_sink::{JsonlSink, RecordSink};
pub use session::{Condition, NavigableSession, SessionCookie};
