// =============================================================================
// component_tests.rs - browser tests for the loan console front end
//
// Covers the localStorage session, the multipart body built for document
// uploads, reading picked files, navigation tabs, and the signed-out shell.
//
// Run with:
//   cd app/leptos-ui && wasm-pack test --headless --chrome
// =============================================================================

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use lc_core::config::SessionConfig;
use lc_core::Session;
use lc_leptos_ui::api::*;

fn storage() -> web_sys::Storage {
    web_sys::window()
        .expect("no window")
        .local_storage()
        .expect("localStorage error")
        .expect("no localStorage")
}

fn reset_storage() {
    let s = storage();
    s.remove_item("token").unwrap();
    s.remove_item("user").unwrap();
}

// =============================================================================
// localStorage session
// =============================================================================

mod session {
    use super::*;
    use lc_api_types::{ApiUser, LoginResponse};

    fn session() -> LocalStorageSession {
        LocalStorageSession::new(&SessionConfig::default())
    }

    #[wasm_bindgen_test]
    fn test_missing_token_is_none() {
        reset_storage();
        assert_eq!(session().token(), None);
        assert_eq!(session().username(), None);
    }

    #[wasm_bindgen_test]
    fn test_blank_token_is_none() {
        reset_storage();
        storage().set_item("token", "   ").unwrap();
        assert_eq!(session().token(), None);
        reset_storage();
    }

    #[wasm_bindgen_test]
    fn test_reads_token_and_username() {
        reset_storage();
        storage().set_item("token", "abc123").unwrap();
        storage()
            .set_item("user", r#"{"id": 3, "username": "ravi_agent", "role": "agent"}"#)
            .unwrap();
        assert_eq!(session().token().as_deref(), Some("abc123"));
        assert_eq!(session().username().as_deref(), Some("ravi_agent"));
        reset_storage();
    }

    #[wasm_bindgen_test]
    fn test_username_falls_back_to_email() {
        reset_storage();
        storage()
            .set_item("user", r#"{"email": "ops@example.com"}"#)
            .unwrap();
        assert_eq!(session().username().as_deref(), Some("ops@example.com"));
        reset_storage();
    }

    #[wasm_bindgen_test]
    fn test_malformed_user_is_ignored() {
        reset_storage();
        storage().set_item("user", "not json").unwrap();
        assert_eq!(session().username(), None);
        reset_storage();
    }

    #[wasm_bindgen_test]
    fn test_store_then_clear() {
        reset_storage();
        let login = LoginResponse {
            token: "tok".into(),
            user: ApiUser {
                id: 1,
                username: "admin".into(),
                email: "admin@example.com".into(),
                role: "admin".into(),
            },
        };
        session().store(&login).expect("store failed");
        assert_eq!(session().token().as_deref(), Some("tok"));
        assert_eq!(session().username().as_deref(), Some("admin"));

        session().clear();
        assert_eq!(session().token(), None);
        assert_eq!(storage().get_item("user").unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn test_custom_keys() {
        reset_storage();
        let config = SessionConfig {
            token_key: "lc_token".into(),
            ..SessionConfig::default()
        };
        storage().set_item("token", "wrong-key").unwrap();
        storage().set_item("lc_token", "right-key").unwrap();
        let s = LocalStorageSession::new(&config);
        assert_eq!(s.token().as_deref(), Some("right-key"));
        storage().remove_item("lc_token").unwrap();
        reset_storage();
    }
}

// =============================================================================
// Multipart upload body
// =============================================================================

mod multipart {
    use super::*;
    use lc_core::transport::{FilePart, MultipartForm};

    #[wasm_bindgen_test]
    fn test_every_file_is_appended_under_documents() {
        let form = MultipartForm::default()
            .file("documents", FilePart::new("id.pdf", b"%PDF".to_vec()).with_content_type("application/pdf"))
            .file("documents", FilePart::new("photo.png", vec![0x89, b'P']))
            .text("customer_id", "42");

        let data = form_data(&form).expect("form_data failed");
        assert_eq!(data.get_all("documents").length(), 2);
        assert_eq!(data.get("customer_id").as_string().as_deref(), Some("42"));
    }

    #[wasm_bindgen_test]
    fn test_file_parts_keep_their_names() {
        let form = MultipartForm::default()
            .file("documents", FilePart::new("statement.csv", b"a,b".to_vec()));
        let data = form_data(&form).expect("form_data failed");
        let file: web_sys::File = wasm_bindgen::JsCast::dyn_into(data.get("documents"))
            .expect("part is not a File");
        assert_eq!(file.name(), "statement.csv");
        assert_eq!(file.size(), 3.0);
    }
}

// =============================================================================
// Picked files
// =============================================================================

mod files {
    use super::*;
    use js_sys::Array;
    use wasm_bindgen::JsValue;

    #[wasm_bindgen_test]
    async fn test_read_file_copies_bytes_and_name() {
        let parts = Array::of1(&JsValue::from_str("hello"));
        let file = web_sys::File::new_with_str_sequence(&parts, "note.txt").unwrap();

        let part = read_file(&file).await.expect("read failed");
        assert_eq!(part.file_name, "note.txt");
        assert_eq!(part.bytes, b"hello".to_vec());
        assert_eq!(part.content_type, None);
    }

    #[wasm_bindgen_test]
    async fn test_no_file_list_reads_nothing() {
        assert!(read_files(None).await.is_empty());
    }
}

// =============================================================================
// Navigation tabs
// =============================================================================

mod navigation {
    use super::*;
    use lc_leptos_ui::components::nav_bar::Tab;

    #[wasm_bindgen_test]
    fn test_tabs_have_distinct_labels_and_shortcuts() {
        let labels: std::collections::HashSet<_> = Tab::ALL.iter().map(|t| t.label()).collect();
        let keys: std::collections::HashSet<_> = Tab::ALL.iter().map(|t| t.shortcut()).collect();
        assert_eq!(labels.len(), Tab::ALL.len());
        assert_eq!(keys.len(), Tab::ALL.len());
    }

    #[wasm_bindgen_test]
    fn test_first_tab_is_loan_history() {
        assert_eq!(Tab::ALL[0], Tab::Loans);
        assert_eq!(Tab::Loans.label(), "Loan History");
    }
}

// =============================================================================
// Helpers
// =============================================================================

mod helpers {
    use super::*;
    use lc_leptos_ui::state::{timestamp, today};

    #[wasm_bindgen_test]
    fn test_timestamp_is_day_first() {
        let ts = timestamp();
        // dd/mm/yyyy, hh:mm:ss
        assert_eq!(ts.len(), 20);
        assert_eq!(&ts[2..3], "/");
        assert!(ts.contains(", "));
    }

    #[wasm_bindgen_test]
    fn test_today_is_iso() {
        let d = today();
        assert_eq!(d.len(), 10);
        assert!(lc_api_types::parse_date(&d).is_some());
    }
}

// =============================================================================
// Signed-out shell
// =============================================================================

mod shell {
    use super::*;

    #[wasm_bindgen_test]
    fn test_without_token_login_form_is_shown() {
        reset_storage();
        leptos::mount::mount_to_body(lc_leptos_ui::App);
        let document = web_sys::window().unwrap().document().unwrap();
        assert!(document.query_selector(".login-page").unwrap().is_some());
        assert!(document.query_selector("input[type=password]").unwrap().is_some());
    }
}
