//! XML store: one document per record type.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8" standalone="yes"?>
//! <retrospectives>
//!   <retrospective id="1" sprint_id="4">
//!     <summary>Good sprint</summary>
//!     <improvements>
//!       <improvement>Smaller PRs</improvement>
//!     </improvements>
//!     <positives/>
//!   </retrospective>
//! </retrospectives>
//! ```

mod documents;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::IoError;

pub use documents::{
    AttachmentNames, Improvements, Positives, XmlProject, XmlRetrospective, XmlSprint, XmlTask,
    XmlUser,
};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// An element type stored as the children of one root element in its own file.
pub trait XmlRecord: Sized {
    const FILE_NAME: &'static str;

    /// Root element wrapping every record of this type.
    type Document: Serialize + DeserializeOwned + Default + From<Vec<Self>> + Into<Vec<Self>>;
}

/// Declare the root document for an element type.
macro_rules! xml_document {
    ($doc:ident, $root:literal, $element:literal, $item:ty, $file:literal) => {
        #[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
        #[serde(rename = $root)]
        pub struct $doc {
            #[serde(rename = $element, default)]
            items: Vec<$item>,
        }

        impl From<Vec<$item>> for $doc {
            fn from(items: Vec<$item>) -> Self {
                Self { items }
            }
        }

        impl From<$doc> for Vec<$item> {
            fn from(doc: $doc) -> Self {
                doc.items
            }
        }

        impl XmlRecord for $item {
            const FILE_NAME: &'static str = $file;
            type Document = $doc;
        }
    };
}

xml_document!(ProjectsDocument, "projects", "project", XmlProject, "projects.xml");
xml_document!(UsersDocument, "users", "user", XmlUser, "users.xml");
xml_document!(SprintsDocument, "sprints", "sprint", XmlSprint, "sprints.xml");
xml_document!(TasksDocument, "tasks", "task", XmlTask, "tasks.xml");
xml_document!(
    RetrospectivesDocument,
    "retrospectives",
    "retrospective",
    XmlRetrospective,
    "retrospectives.xml"
);

#[derive(Debug, Clone)]
pub struct XmlStore {
    dir: PathBuf,
}

impl XmlStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for<R: XmlRecord>(&self) -> PathBuf {
        self.dir.join(R::FILE_NAME)
    }

    /// Serialize `records` with a declaration and two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if serialization fails or the file cannot be written.
    pub fn write_all<R: XmlRecord>(&self, records: Vec<R>) -> Result<PathBuf, IoError> {
        let count = records.len();
        let document = R::Document::from(records);

        let mut xml = String::from(DECLARATION);
        xml.push('\n');
        let mut serializer = quick_xml::se::Serializer::new(&mut xml);
        serializer.indent(' ', 2);
        document.serialize(serializer)?;
        xml.push('\n');

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for::<R>();
        fs::write(&path, xml)?;
        tracing::debug!(file = R::FILE_NAME, records = count, "wrote xml file");
        Ok(path)
    }

    /// A missing file reads as an empty list.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read or is not a valid document.
    pub fn read_all<R: XmlRecord>(&self) -> Result<Vec<R>, IoError> {
        let path = self.path_for::<R>();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let xml = fs::read_to_string(&path)?;
        let document: R::Document = quick_xml::de::from_str(&xml)?;
        Ok(document.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn retro() -> XmlRetrospective {
        XmlRetrospective {
            id: 1,
            sprint_id: 4,
            summary: "Good sprint".into(),
            improvements: Improvements {
                items: vec!["Smaller PRs".into()],
            },
            positives: Positives::default(),
        }
    }

    #[test]
    fn writes_declaration_and_indentation() {
        let dir = tempfile::tempdir().unwrap();
        let store = XmlStore::new(dir.path());
        let path = store.write_all(vec![retro()]).unwrap();

        let xml = fs::read_to_string(path).unwrap();
        assert!(xml.starts_with(DECLARATION), "{xml}");
        assert!(xml.contains(r#"<retrospective id="1" sprint_id="4">"#), "{xml}");
        assert!(xml.contains("\n    <summary>Good sprint</summary>"), "{xml}");
        assert!(
            xml.contains("\n      <improvement>Smaller PRs</improvement>"),
            "{xml}"
        );
    }

    #[test]
    fn reads_back_what_it_wrote() {
        let dir = tempfile::tempdir().unwrap();
        let store = XmlStore::new(dir.path());
        store.write_all(vec![retro()]).unwrap();

        let back: Vec<XmlRetrospective> = store.read_all().unwrap();
        assert_eq!(back, vec![retro()]);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = XmlStore::new(dir.path().join("nothing-here"));
        assert!(store.read_all::<XmlProject>().unwrap().is_empty());
    }

    #[test]
    fn empty_list_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = XmlStore::new(dir.path());
        store.write_all::<XmlSprint>(Vec::new()).unwrap();
        assert!(store.read_all::<XmlSprint>().unwrap().is_empty());
    }

    #[test]
    fn garbage_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = XmlStore::new(dir.path());
        fs::write(store.path_for::<XmlUser>(), "<users><user id=").unwrap();
        assert!(matches!(
            store.read_all::<XmlUser>(),
            Err(IoError::XmlRead(_))
        ));
    }
}
