/// File categorization for extension-based sorting.
///
/// Maps file extensions to broad categories ("Images", "Documents", ...) via
/// a lookup table with a fixed fallback for anything unrecognized.
///
/// # Examples
///
/// ```
/// use tidymove::category::{Category, CategoryMap};
///
/// let map = CategoryMap::default();
/// assert_eq!(map.category_for(Some("jpg")), Category::Image);
/// assert_eq!(map.category_for(Some("PDF")), Category::Document);
/// assert_eq!(map.category_for(None), Category::Other);
/// ```
use std::collections::HashMap;

/// A broad file category, used as the top-level destination folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Image files (PNG, JPG, SVG, etc.)
    Image,
    /// Document files (PDF, DOCX, TXT, etc.)
    Document,
    /// Audio files (MP3, WAV, FLAC, etc.)
    Audio,
    /// Video files (MP4, MKV, MOV, etc.)
    Video,
    /// Archive files (ZIP, RAR, 7Z, etc.)
    Archive,
    /// Source code and config files (Rust, Python, JSON, etc.)
    Code,
    /// 3D / CAD / BIM files (DWG, SKP, FBX, etc.)
    Cad,
    /// Unknown or uncategorized files
    Other,
}

impl Category {
    /// Returns the destination directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidymove::category::Category;
    ///
    /// assert_eq!(Category::Image.dir_name(), "Images");
    /// assert_eq!(Category::Cad.dir_name(), "CAD");
    /// assert_eq!(Category::Other.dir_name(), "Other");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Image => "Images",
            Category::Document => "Documents",
            Category::Audio => "Audio",
            Category::Video => "Video",
            Category::Archive => "Archives",
            Category::Code => "Code",
            Category::Cad => "CAD",
            Category::Other => "Other",
        }
    }

    /// Parses a category from its directory name, case-insensitively.
    ///
    /// Used when reading `[categories]` overrides from a config file.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidymove::category::Category;
    ///
    /// assert_eq!(Category::from_name("Images"), Some(Category::Image));
    /// assert_eq!(Category::from_name("audio"), Some(Category::Audio));
    /// assert_eq!(Category::from_name("Stuff"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "images" => Some(Category::Image),
            "documents" => Some(Category::Document),
            "audio" => Some(Category::Audio),
            "video" => Some(Category::Video),
            "archives" => Some(Category::Archive),
            "code" => Some(Category::Code),
            "cad" => Some(Category::Cad),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

/// Maps file extensions to categories.
///
/// Lookups are case-insensitive and tolerate a leading dot. The table is
/// owned by the caller and passed into the organizer, so alternate mappings
/// can be substituted without touching any global state.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    extension_map: HashMap<String, Category>,
}

impl CategoryMap {
    /// Creates a new `CategoryMap` with the standard extension table.
    pub fn new() -> Self {
        let mut map = Self {
            extension_map: HashMap::new(),
        };
        map.populate_standard_mappings();
        map
    }

    /// Creates an empty `CategoryMap` with no extension mappings.
    pub fn empty() -> Self {
        Self {
            extension_map: HashMap::new(),
        }
    }

    fn populate_standard_mappings(&mut self) {
        const IMAGES: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "tif", "tiff", "svg"];
        const DOCUMENTS: &[&str] = &[
            "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "md", "rtf",
        ];
        const AUDIO: &[&str] = &["mp3", "wav", "flac", "aac"];
        const VIDEO: &[&str] = &["mp4", "mov", "avi", "mkv", "webm"];
        const ARCHIVES: &[&str] = &["zip", "rar", "7z", "tar", "gz", "bz2"];
        const CODE: &[&str] = &[
            "py", "js", "ts", "java", "cpp", "c", "cs", "go", "rb", "php", "sh", "bat", "ps1",
            "json", "yaml", "yml", "xml", "html", "css",
        ];
        const CAD: &[&str] = &["dwg", "dxf", "rvt", "skp", "obj", "fbx", "dae"];

        let groups: &[(&[&str], Category)] = &[
            (IMAGES, Category::Image),
            (DOCUMENTS, Category::Document),
            (AUDIO, Category::Audio),
            (VIDEO, Category::Video),
            (ARCHIVES, Category::Archive),
            (CODE, Category::Code),
            (CAD, Category::Cad),
        ];

        for (extensions, category) in groups {
            for ext in *extensions {
                self.add_mapping(ext, *category);
            }
        }
    }

    /// Adds or replaces an extension mapping.
    ///
    /// The extension is lowercased and any leading dot is stripped, so
    /// `"JPG"`, `".jpg"` and `"jpg"` all refer to the same key.
    pub fn add_mapping(&mut self, extension: &str, category: Category) {
        let key = extension.trim_start_matches('.').to_lowercase();
        self.extension_map.insert(key, category);
    }

    /// Looks up the category for a file extension.
    ///
    /// Returns [`Category::Other`] for unmapped extensions and for files
    /// without an extension (`None`).
    ///
    /// # Examples
    ///
    /// ```
    /// use tidymove::category::{Category, CategoryMap};
    ///
    /// let map = CategoryMap::default();
    /// assert_eq!(map.category_for(Some("mp3")), Category::Audio);
    /// assert_eq!(map.category_for(Some(".ZIP")), Category::Archive);
    /// assert_eq!(map.category_for(Some("xyz")), Category::Other);
    /// ```
    pub fn category_for(&self, extension: Option<&str>) -> Category {
        let Some(ext) = extension else {
            return Category::Other;
        };
        let key = ext.trim_start_matches('.').to_lowercase();
        self.extension_map
            .get(&key)
            .copied()
            .unwrap_or(Category::Other)
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dir_names() {
        assert_eq!(Category::Image.dir_name(), "Images");
        assert_eq!(Category::Document.dir_name(), "Documents");
        assert_eq!(Category::Audio.dir_name(), "Audio");
        assert_eq!(Category::Video.dir_name(), "Video");
        assert_eq!(Category::Archive.dir_name(), "Archives");
        assert_eq!(Category::Code.dir_name(), "Code");
        assert_eq!(Category::Cad.dir_name(), "CAD");
        assert_eq!(Category::Other.dir_name(), "Other");
    }

    #[test]
    fn test_from_name_round_trips_dir_names() {
        for category in [
            Category::Image,
            Category::Document,
            Category::Audio,
            Category::Video,
            Category::Archive,
            Category::Code,
            Category::Cad,
            Category::Other,
        ] {
            assert_eq!(Category::from_name(category.dir_name()), Some(category));
        }
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(Category::from_name("IMAGES"), Some(Category::Image));
        assert_eq!(Category::from_name("documents"), Some(Category::Document));
        assert_eq!(Category::from_name("unknown"), None);
    }

    #[test]
    fn test_standard_table_lookups() {
        let map = CategoryMap::default();
        assert_eq!(map.category_for(Some("jpg")), Category::Image);
        assert_eq!(map.category_for(Some("pdf")), Category::Document);
        assert_eq!(map.category_for(Some("flac")), Category::Audio);
        assert_eq!(map.category_for(Some("mkv")), Category::Video);
        assert_eq!(map.category_for(Some("7z")), Category::Archive);
        assert_eq!(map.category_for(Some("rs")), Category::Other); // not in the table
        assert_eq!(map.category_for(Some("py")), Category::Code);
        assert_eq!(map.category_for(Some("dwg")), Category::Cad);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let map = CategoryMap::default();
        assert_eq!(map.category_for(Some("JPG")), Category::Image);
        assert_eq!(map.category_for(Some("Pdf")), Category::Document);
    }

    #[test]
    fn test_lookup_tolerates_leading_dot() {
        let map = CategoryMap::default();
        assert_eq!(map.category_for(Some(".jpg")), Category::Image);
        assert_eq!(map.category_for(Some(".TAR")), Category::Archive);
    }

    #[test]
    fn test_unmapped_and_missing_extension_fall_back_to_other() {
        let map = CategoryMap::default();
        assert_eq!(map.category_for(Some("xyz")), Category::Other);
        assert_eq!(map.category_for(None), Category::Other);
    }

    #[test]
    fn test_add_mapping_overrides_default() {
        let mut map = CategoryMap::default();
        map.add_mapping("txt", Category::Code);
        assert_eq!(map.category_for(Some("txt")), Category::Code);
    }

    #[test]
    fn test_add_mapping_extends_table() {
        let mut map = CategoryMap::default();
        map.add_mapping("log", Category::Document);
        assert_eq!(map.category_for(Some("log")), Category::Document);
        assert_eq!(map.category_for(Some("LOG")), Category::Document);
    }

    #[test]
    fn test_empty_map_maps_everything_to_other() {
        let map = CategoryMap::empty();
        assert_eq!(map.category_for(Some("jpg")), Category::Other);
    }
}
