//! Language-neutral namer: every operation uses the shared composition.

use crate::comment::{CommentReformatter, IdentityCommentReformatter};
use crate::formatter::{CommonNameFormatter, NameFormatter};
use crate::traits::SurfaceNamer;
use crate::types::{CommonTypeFormatter, TypeFormatter};

#[derive(Debug, Clone)]
pub struct CommonNamer {
    package_name: String,
}

impl CommonNamer {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
        }
    }
}

impl SurfaceNamer for CommonNamer {
    fn language(&self) -> &'static str {
        "common"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn package_name(&self) -> &str {
        &self.package_name
    }

    fn name_formatter(&self) -> &dyn NameFormatter {
        &CommonNameFormatter
    }

    fn type_formatter(&self) -> &dyn TypeFormatter {
        &CommonTypeFormatter
    }

    fn comment_reformatter(&self) -> &dyn CommentReformatter {
        &IdentityCommentReformatter
    }

    fn clone_with_package_name(&self, package_name: &str) -> Box<dyn SurfaceNamer> {
        Box::new(CommonNamer::new(package_name))
    }
}
