use super::PageStore;
use crate::error::{Result, WikiError};
use crate::model::{Page, Title};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

pub struct FileStore {
    root: PathBuf,
    file_ext: String,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_ext: ".txt".to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    pub fn page_path(&self, title: &Title) -> PathBuf {
        self.root.join(format!("{}{}", title, self.file_ext))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(WikiError::Io)?;
        }
        Ok(())
    }
}

impl PageStore for FileStore {
    fn load(&self, title: &Title) -> Result<Page> {
        let path = self.page_path(title);
        debug!(title = %title, path = %path.display(), "loading page");
        match fs::read(&path) {
            Ok(body) => Ok(Page::new(title.clone(), body)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(WikiError::PageNotFound(title.to_string()))
            }
            Err(e) => Err(WikiError::Io(e)),
        }
    }

    fn save(&self, page: &Page) -> Result<()> {
        self.ensure_dir()?;
        let path = self.page_path(&page.title);
        debug!(title = %page.title, bytes = page.body.len(), "saving page");
        fs::write(path, &page.body).map_err(WikiError::Io)?;
        Ok(())
    }

    fn scan(&self) -> Result<Vec<String>> {
        // Nothing has been saved yet
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut titles = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(WikiError::Io)? {
            let entry = entry.map_err(WikiError::Io)?;
            if !entry.file_type().map_err(WikiError::Io)?.is_file() {
                continue;
            }
            let path = entry.path();
            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) => titles.push(stem.to_string()),
                None => debug!(path = %path.display(), "skipping file without a UTF-8 name"),
            }
        }
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn title(raw: &str) -> Title {
        Title::parse(raw).unwrap()
    }

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_save_then_load_returns_same_body() {
        let (_dir, store) = setup();
        let page = Page::new(title("Home"), "Hello");

        store.save(&page).unwrap();
        let loaded = store.load(&title("Home")).unwrap();

        assert_eq!(loaded, page);
    }

    #[test]
    fn test_save_writes_title_txt_file() {
        let (dir, store) = setup();
        store
            .save(&Page::new(title("Shopping list"), "eggs"))
            .unwrap();

        let on_disk = fs::read_to_string(dir.path().join("Shopping list.txt")).unwrap();
        assert_eq!(on_disk, "eggs");
    }

    #[test]
    fn test_save_overwrites_existing_page() {
        let (_dir, store) = setup();
        store.save(&Page::new(title("Home"), "first")).unwrap();
        store.save(&Page::new(title("Home"), "second")).unwrap();

        assert_eq!(store.load(&title("Home")).unwrap().body, b"second");
    }

    #[test]
    fn test_save_empty_body() {
        let (_dir, store) = setup();
        store.save(&Page::blank(title("Empty"))).unwrap();

        assert!(store.load(&title("Empty")).unwrap().body.is_empty());
    }

    #[test]
    fn test_load_missing_page_is_not_found() {
        let (_dir, store) = setup();
        match store.load(&title("NoSuchPage")) {
            Err(WikiError::PageNotFound(t)) => assert_eq!(t, "NoSuchPage"),
            other => panic!("expected PageNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_save_creates_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("data");
        let store = FileStore::new(&root);

        store.save(&Page::new(title("Home"), "hi")).unwrap();
        assert!(root.join("Home.txt").exists());
    }

    #[test]
    fn test_save_fails_with_io_when_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("not-a-dir");
        fs::write(&root, "occupied").unwrap();
        let store = FileStore::new(&root);

        let err = store.save(&Page::new(title("Home"), "hi")).unwrap_err();
        assert!(matches!(err, WikiError::Io(_)));
    }

    #[test]
    fn test_custom_file_ext() {
        let (dir, store) = setup();
        let store = store.with_file_ext("md");
        assert_eq!(store.file_ext(), ".md");

        store.save(&Page::new(title("Notes"), "# hi")).unwrap();
        assert!(dir.path().join("Notes.md").exists());
        assert_eq!(store.load(&title("Notes")).unwrap().body, b"# hi");
    }

    #[test]
    fn test_scan_lists_every_file_by_stem() {
        let (dir, store) = setup();
        store.save(&Page::new(title("Home"), "a")).unwrap();
        store.save(&Page::new(title("Ideas"), "b")).unwrap();
        fs::write(dir.path().join("stray.md"), "c").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let mut titles = store.scan().unwrap();
        titles.sort();
        assert_eq!(titles, vec!["Home", "Ideas", "stray"]);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("missing"));
        assert!(store.scan().unwrap().is_empty());
    }

    #[test]
    fn test_scan_fails_when_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("file");
        fs::write(&root, "x").unwrap();

        assert!(FileStore::new(&root).scan().is_err());
    }
}
