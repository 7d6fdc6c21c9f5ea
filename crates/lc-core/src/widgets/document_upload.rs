//! Drag-and-drop document uploader for one customer.

use lc_api_types::{CustomerId, UploadResponse};

use crate::error::ApiError;
use crate::notice::Notice;
use crate::transport::FilePart;

pub const UPLOAD_OK: &str = "Files uploaded successfully!";
pub const UPLOAD_FAILED: &str = "Failed to upload files.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDispatch {
    pub customer: CustomerId,
    pub files: Vec<FilePart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUploader {
    customer: CustomerId,
    files: Vec<FilePart>,
    // Files carried by the upload in flight.
    sending: Vec<FilePart>,
    dragging: bool,
    uploading: bool,
    outcome: Option<Notice>,
}

impl DocumentUploader {
    pub fn new(customer: CustomerId) -> Self {
        Self {
            customer,
            files: Vec::new(),
            sending: Vec::new(),
            dragging: false,
            uploading: false,
            outcome: None,
        }
    }

    pub fn customer(&self) -> CustomerId {
        self.customer
    }

    /// Picked or dropped files are appended to the pending list.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = FilePart>) {
        self.files.extend(files);
    }

    pub fn remove_file(&mut self, index: usize) -> Option<FilePart> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn outcome(&self) -> Option<&Notice> {
        self.outcome.as_ref()
    }

    /// Start an upload of every pending file.
    ///
    /// With no files, or while an upload is running, this is a no-op and
    /// returns `None`.
    pub fn begin_upload(&mut self) -> Option<UploadDispatch> {
        if self.files.is_empty() || self.uploading {
            return None;
        }
        self.uploading = true;
        self.outcome = None;
        self.sending = self.files.clone();
        Some(UploadDispatch {
            customer: self.customer,
            files: self.sending.clone(),
        })
    }

    /// Success drops the files that were sent; anything added while the
    /// request was running stays pending. Failure keeps everything.
    pub fn finish_upload(&mut self, result: Result<UploadResponse, ApiError>) -> Notice {
        self.uploading = false;
        let sent = std::mem::take(&mut self.sending);
        let notice = match result {
            Ok(_) => {
                tracing::info!(customer = self.customer, count = sent.len(), "documents uploaded");
                for part in &sent {
                    if let Some(pos) = self.files.iter().position(|f| f == part) {
                        self.files.remove(pos);
                    }
                }
                Notice::success(UPLOAD_OK)
            }
            Err(err) => {
                tracing::warn!(customer = self.customer, error = %err, "document upload failed");
                Notice::error(UPLOAD_FAILED)
            }
        };
        self.outcome = Some(notice.clone());
        notice
    }
}
