//! Local disk storage for uploaded media

mod uploads;

pub use uploads::{stored_file_name, UploadStore, UPLOADS_ROUTE};
