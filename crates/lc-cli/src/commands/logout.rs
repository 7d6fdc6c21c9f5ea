use lc_core::session::FileSession;

/// Run the `logout` subcommand: forget the stored token.
pub fn run(store: &FileSession) -> anyhow::Result<()> {
    store.clear()?;
    println!("Logged out.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use lc_core::session::{Session, StaticSession};

    use super::*;

    #[test]
    fn clears_stored_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSession::new(dir.path().join("token"));
        store.store(&StaticSession::new("abc")).unwrap();

        run(&store).unwrap();
        assert_eq!(store.token(), None);
        // Logging out twice is not an error.
        run(&store).unwrap();
    }
}
