use std::path::{Path, PathBuf};

use anyhow::Context;
use lc_api_types::CustomerId;
use lc_core::session::Session;
use lc_core::transport::FilePart;
use lc_core::widgets::document_upload::DocumentUploader;

use super::Api;

/// Best-effort MIME type from the file extension.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => return None,
    })
}

async fn read_part(path: &Path) -> anyhow::Result<FilePart> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let part = FilePart::new(name, bytes);
    Ok(match content_type_for(path) {
        Some(ct) => part.with_content_type(ct),
        None => part,
    })
}

/// Run the `upload` subcommand: attach documents to a customer.
pub async fn run<S: Session>(api: &Api<S>, customer: CustomerId, files: &[PathBuf]) -> anyhow::Result<()> {
    let mut uploader = DocumentUploader::new(customer);
    for path in files {
        uploader.add_files([read_part(path).await?]);
    }

    let Some(dispatch) = uploader.begin_upload() else {
        anyhow::bail!("No files to upload");
    };
    tracing::debug!(customer, count = dispatch.files.len(), "uploading documents");
    let result = api.upload_documents(dispatch.customer, dispatch.files).await;
    let notice = uploader.finish_upload(result);
    if !notice.is_success() {
        anyhow::bail!(notice.message);
    }
    println!("{}", notice.message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{extract::Multipart, http::StatusCode, routing::post, Json, Router};
    use lc_core::widgets::document_upload::UPLOAD_FAILED;
    use serde_json::json;

    use super::super::test_support::{authed, serve};
    use super::*;

    #[test]
    fn content_types() {
        assert_eq!(content_type_for(Path::new("a.PDF")), Some("application/pdf"));
        assert_eq!(content_type_for(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(content_type_for(Path::new("noext")), None);
    }

    #[tokio::test]
    async fn uploads_every_file_under_documents() {
        let app = Router::new().route(
            "/api/customers/upload-documents/",
            post(|mut form: Multipart| async move {
                let mut documents = 0;
                let mut customer = String::new();
                while let Some(field) = form.next_field().await.unwrap() {
                    let name = field.name().map(str::to_string);
                    match name.as_deref() {
                        Some("documents") => documents += 1,
                        Some("customer_id") => customer = field.text().await.unwrap(),
                        _ => {}
                    }
                }
                assert_eq!(documents, 2);
                assert_eq!(customer, "42");
                Json(json!({"message": "ok"}))
            }),
        );
        let url = serve(app).await;

        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("id.pdf");
        let b = dir.path().join("photo.png");
        std::fs::write(&a, b"%PDF-1.4").unwrap();
        std::fs::write(&b, [0x89, b'P', b'N', b'G']).unwrap();

        assert!(run(&authed(&url), 42, &[a, b]).await.is_ok());
    }

    #[tokio::test]
    async fn failed_upload_reports_generic_message() {
        let app = Router::new().route(
            "/api/customers/upload-documents/",
            post(|| async { (StatusCode::PAYLOAD_TOO_LARGE, Json(json!({}))) }),
        );
        let url = serve(app).await;
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("big.pdf");
        std::fs::write(&a, b"x").unwrap();

        let err = run(&authed(&url), 42, &[a]).await.unwrap_err().to_string();
        assert_eq!(err, UPLOAD_FAILED);
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let err = run(&authed("http://127.0.0.1:9"), 1, &[PathBuf::from("/nope/missing.pdf")])
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("missing.pdf"));
    }

    #[tokio::test]
    async fn no_files_sends_nothing() {
        let err = run(&authed("http://127.0.0.1:9"), 1, &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "No files to upload");
    }
}
