//! Registry of target languages.

use crate::common::CommonNamer;
use crate::traits::{SurfaceError, SurfaceNamer};
use apigen_config::ConfigProto;
use std::sync::{OnceLock, PoisonError, RwLock};

/// A target language that can build namers for a package.
pub trait SurfaceLanguage: Send + Sync {
    /// Language name as written in config (e.g., "ruby").
    fn language(&self) -> &'static str;

    /// Source file extension, without the dot.
    fn extension(&self) -> &'static str;

    fn namer(&self, package_name: &str) -> Box<dyn SurfaceNamer>;
}

pub struct CommonLanguage;

impl SurfaceLanguage for CommonLanguage {
    fn language(&self) -> &'static str {
        "common"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn namer(&self, package_name: &str) -> Box<dyn SurfaceNamer> {
        Box::new(CommonNamer::new(package_name))
    }
}

pub static COMMON_LANGUAGE: CommonLanguage = CommonLanguage;

#[cfg(feature = "ruby")]
pub struct RubyLanguage;

#[cfg(feature = "ruby")]
impl SurfaceLanguage for RubyLanguage {
    fn language(&self) -> &'static str {
        "ruby"
    }

    fn extension(&self) -> &'static str {
        "rb"
    }

    fn namer(&self, package_name: &str) -> Box<dyn SurfaceNamer> {
        Box::new(crate::ruby::RubyNamer::new(package_name))
    }
}

#[cfg(feature = "ruby")]
pub static RUBY_LANGUAGE: RubyLanguage = RubyLanguage;

#[cfg(feature = "python")]
pub struct PythonLanguage;

#[cfg(feature = "python")]
impl SurfaceLanguage for PythonLanguage {
    fn language(&self) -> &'static str {
        "python"
    }

    fn extension(&self) -> &'static str {
        "py"
    }

    fn namer(&self, package_name: &str) -> Box<dyn SurfaceNamer> {
        Box::new(crate::python::PythonNamer::new(package_name))
    }
}

#[cfg(feature = "python")]
pub static PYTHON_LANGUAGE: PythonLanguage = PythonLanguage;

static LANGUAGES: RwLock<Vec<&'static dyn SurfaceLanguage>> = RwLock::new(Vec::new());
static LANGUAGES_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register an additional target language. Later registrations do not
/// shadow earlier ones with the same name.
pub fn register_language(language: &'static dyn SurfaceLanguage) {
    LANGUAGES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(language);
}

fn init_languages() {
    LANGUAGES_INITIALIZED.get_or_init(|| {
        register_language(&COMMON_LANGUAGE);
        #[cfg(feature = "ruby")]
        {
            register_language(&RUBY_LANGUAGE);
        }
        #[cfg(feature = "python")]
        {
            register_language(&PYTHON_LANGUAGE);
        }
    });
}

/// Get a language by name.
pub fn language(name: &str) -> Option<&'static dyn SurfaceLanguage> {
    init_languages();
    LANGUAGES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find(|l| l.language() == name)
        .copied()
}

/// Build a namer for `lang` over `package_name`.
pub fn namer_for_language(lang: &str, package_name: &str) -> Option<Box<dyn SurfaceNamer>> {
    language(lang).map(|l| l.namer(package_name))
}

/// Get all registered languages.
pub fn languages() -> Vec<&'static dyn SurfaceLanguage> {
    init_languages();
    LANGUAGES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Namer for the run described by `config`: its `language`, with the package
/// name from that language's settings.
pub fn namer_for_config(config: &ConfigProto) -> Result<Box<dyn SurfaceNamer>, SurfaceError> {
    let lang = language(&config.language)
        .ok_or_else(|| SurfaceError::UnknownLanguage(config.language.clone()))?;
    let package_name = config
        .language_settings
        .get(lang.language())
        .map(|s| s.package_name.as_str())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| SurfaceError::MissingPackageName(config.language.clone()))?;
    Ok(lang.namer(package_name))
}
