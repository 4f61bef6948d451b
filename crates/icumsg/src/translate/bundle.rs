//! Directory-backed translator bundle.
//!
//! A bundle maps language tags to translators loaded from
//! `<directory>/<tag>.toml`:
//!
//! ```toml
//! tag = "de"          # optional, defaults to the file stem
//! base = "en"         # optional, consulted for keys missing here
//!
//! [translations]
//! greeting = "Hallo {name}!"
//! ```
//!
//! Loaded translators are cached per tag and reloaded only when the
//! modification time of the resource, or of any resource in its `base`
//! chain, changes.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

use bon::Builder;
use serde::Deserialize;
use tracing::debug;

use crate::interpreter::MessageFormatter;
use crate::translate::error::LoadError;
use crate::translate::negotiation::{candidate_tags, parse_accept_language};
use crate::translate::translator::{HierarchicalTranslator, NoopTranslator, Translator};

/// The decoded contents of one resource file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resource {
    /// Language the templates are written for.
    pub tag: Option<String>,
    /// Tag of the resource consulted for missing keys.
    pub base: Option<String>,
    /// Templates keyed by message key.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl Resource {
    /// Decode a resource from TOML text.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and decode a resource file.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Loads and caches translators from a directory of resource files.
///
/// # Example
///
/// ```no_run
/// use icumsg::translate::{Bundle, Translator};
/// use icumsg::params;
///
/// let bundle = Bundle::builder().directory("locales").build();
/// let translator = bundle.translator_for_accept_language("de-CH, de;q=0.9, en;q=0.5");
/// println!("{}", translator.translate("greeting", &params! { "name" => "Ada" }));
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Bundle {
    /// Directory holding `<tag>.toml` resources.
    #[builder(into)]
    directory: PathBuf,

    /// Tag used when negotiation finds no loadable resource.
    #[builder(default = "en".to_string())]
    default_language: String,

    /// Formatter shared by every translator of this bundle.
    #[builder(default)]
    formatter: Arc<MessageFormatter>,

    /// Loaded translators keyed by tag.
    #[builder(skip)]
    cache: RwLock<HashMap<String, CacheEntry>>,
}

#[derive(Clone)]
struct CacheEntry {
    translator: Arc<HierarchicalTranslator>,
    /// Modification times of the resource and every base it chains to.
    sources: Vec<(PathBuf, SystemTime)>,
}

impl CacheEntry {
    fn is_fresh(&self) -> bool {
        self.sources
            .iter()
            .all(|(path, modified)| modified_time(path).is_ok_and(|m| m == *modified))
    }
}

impl Bundle {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn formatter(&self) -> &Arc<MessageFormatter> {
        &self.formatter
    }

    /// Path of the resource file for a tag.
    pub fn resource_path(&self, tag: &str) -> PathBuf {
        self.directory.join(format!("{tag}.toml"))
    }

    /// Load the translator for a tag, reusing the cached one while its
    /// resources are unchanged.
    pub fn load(&self, tag: &str) -> Result<Arc<HierarchicalTranslator>, LoadError> {
        self.load_chain(tag, &mut Vec::new())
            .map(|entry| entry.translator)
    }

    fn load_chain(&self, tag: &str, chain: &mut Vec<String>) -> Result<CacheEntry, LoadError> {
        validate_tag(tag)?;
        if chain.iter().any(|t| t == tag) {
            let mut chain = chain.clone();
            chain.push(tag.to_string());
            return Err(LoadError::CyclicBase { chain });
        }

        let path = self.resource_path(tag);
        let modified = modified_time(&path)?;
        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tag)
            .cloned();
        if let Some(entry) = cached
            && entry.is_fresh()
        {
            return Ok(entry);
        }

        debug!(language = tag, path = %path.display(), "loading resource");
        let resource = Resource::from_path(&path)?;
        let mut sources = vec![(path, modified)];

        chain.push(tag.to_string());
        let base = match resource.base.as_deref() {
            Some(base_tag) => {
                let base_entry = self.load_chain(base_tag, chain)?;
                sources.extend(base_entry.sources);
                Some(base_entry.translator as Arc<dyn Translator>)
            }
            None => None,
        };
        chain.pop();

        let translator = HierarchicalTranslator::builder()
            .language(resource.tag.unwrap_or_else(|| tag.to_string()))
            .translations(resource.translations.into_iter().collect())
            .maybe_base(base)
            .formatter(Arc::clone(&self.formatter))
            .build();
        let entry = CacheEntry {
            translator: Arc::new(translator),
            sources,
        };
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tag.to_string(), entry.clone());
        Ok(entry)
    }

    /// The translator for a tag, or a [`NoopTranslator`] when the resource
    /// cannot be loaded.
    pub fn translator_for_language(&self, tag: &str) -> Arc<dyn Translator> {
        match self.load(tag) {
            Ok(translator) => translator,
            Err(error) => {
                debug!(language = tag, %error, "resource unavailable, using no-op translator");
                Arc::new(NoopTranslator)
            }
        }
    }

    /// The translator for the best loadable range of an `Accept-Language`
    /// header, falling back to the default language.
    pub fn translator_for_accept_language(&self, header: &str) -> Arc<dyn Translator> {
        match self.negotiate_translator(header) {
            Some((_, translator)) => translator,
            None => self.translator_for_language(&self.default_language),
        }
    }

    /// The tag [`Bundle::translator_for_accept_language`] would load, or
    /// `None` when it would fall back to the default language.
    pub fn select_language(&self, header: &str) -> Option<String> {
        self.negotiate_translator(header).map(|(tag, _)| tag)
    }

    fn negotiate_translator(&self, header: &str) -> Option<(String, Arc<HierarchicalTranslator>)> {
        parse_accept_language(header)
            .iter()
            .filter(|range| range.quality > 0.0 && !range.is_wildcard())
            .flat_map(candidate_tags)
            .find_map(|tag| match self.load(&tag) {
                Ok(translator) => Some((tag, translator)),
                Err(error) => {
                    debug!(language = %tag, %error, "skipping unavailable language");
                    None
                }
            })
    }

    /// Tags of all resource files in the directory, sorted.
    pub fn available_languages(&self) -> Result<Vec<String>, LoadError> {
        let entries = fs::read_dir(&self.directory).map_err(|source| LoadError::Io {
            path: self.directory.clone(),
            source,
        })?;
        let mut tags: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        tags.sort_unstable();
        Ok(tags)
    }

    /// Tags currently held in the cache, sorted.
    pub fn cached_languages(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        tags.sort_unstable();
        tags
    }

    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

fn modified_time(path: &Path) -> Result<SystemTime, LoadError> {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Tags become file names, so only letters, digits, `-` and `_` are allowed.
fn validate_tag(tag: &str) -> Result<(), LoadError> {
    let valid = !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(LoadError::InvalidTag {
            tag: tag.to_string(),
        })
    }
}
