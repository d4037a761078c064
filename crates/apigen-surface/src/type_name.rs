//! Type spellings with an optional generic pattern.

/// A type's full and short spelling, optionally wrapping argument types.
///
/// The pattern uses `%s` for the type's own name and `%i` for each argument
/// in order, e.g. `%s<%i>` renders `Array<Book>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    full_name: String,
    nickname: String,
    pattern: Option<String>,
    args: Vec<TypeName>,
}

impl TypeName {
    pub fn new(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        Self {
            nickname: full_name.clone(),
            full_name,
            pattern: None,
            args: Vec::new(),
        }
    }

    pub fn with_nickname(full_name: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            nickname: nickname.into(),
            pattern: None,
            args: Vec::new(),
        }
    }

    pub fn with_pattern(
        full_name: impl Into<String>,
        nickname: impl Into<String>,
        pattern: impl Into<String>,
        args: Vec<TypeName>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            nickname: nickname.into(),
            pattern: Some(pattern.into()),
            args,
        }
    }

    pub fn full_name(&self) -> String {
        self.render(&self.full_name, TypeName::full_name)
    }

    pub fn nickname(&self) -> String {
        self.render(&self.nickname, TypeName::nickname)
    }

    fn render(&self, own: &str, arg_name: fn(&TypeName) -> String) -> String {
        let Some(pattern) = &self.pattern else {
            return own.to_string();
        };
        let mut args = self.args.iter();
        let mut out = String::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('s') => out.push_str(own),
                Some('i') => {
                    if let Some(arg) = args.next() {
                        out.push_str(&arg_name(arg));
                    }
                }
                Some(other) => {
                    out.push('%');
                    out.push(other);
                }
                None => out.push('%'),
            }
        }
        out
    }
}
