use serde::Serialize;
use std::fmt;

/// Where a documentation comment attaches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    Package {
        package: String,
    },
    Class {
        package: String,
        class_name: String,
    },
    Method {
        package: String,
        class_name: String,
        method_name: String,
        /// Parenthesised, comma-separated parameter types, e.g. `(int,java.util.List<T>)`.
        parameters: String,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocationKind {
    Package,
    Class,
    Method,
}

impl LocationKind {
    pub fn label(self) -> &'static str {
        match self {
            LocationKind::Package => "package",
            LocationKind::Class => "class",
            LocationKind::Method => "method",
        }
    }
}

impl Location {
    pub fn package(package: impl Into<String>) -> Self {
        Location::Package {
            package: package.into(),
        }
    }

    pub fn class(package: impl Into<String>, class_name: impl Into<String>) -> Self {
        Location::Class {
            package: package.into(),
            class_name: class_name.into(),
        }
    }

    pub fn method(
        package: impl Into<String>,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        parameters: impl Into<String>,
    ) -> Self {
        Location::Method {
            package: package.into(),
            class_name: class_name.into(),
            method_name: method_name.into(),
            parameters: parameters.into(),
        }
    }

    pub fn kind(&self) -> LocationKind {
        match self {
            Location::Package { .. } => LocationKind::Package,
            Location::Class { .. } => LocationKind::Class,
            Location::Method { .. } => LocationKind::Method,
        }
    }

    pub fn package_name(&self) -> &str {
        match self {
            Location::Package { package }
            | Location::Class { package, .. }
            | Location::Method { package, .. } => package,
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            Location::Package { .. } => None,
            Location::Class { class_name, .. } | Location::Method { class_name, .. } => {
                Some(class_name)
            }
        }
    }

    pub fn method_name(&self) -> Option<&str> {
        match self {
            Location::Method { method_name, .. } => Some(method_name),
            _ => None,
        }
    }

    pub fn parameters(&self) -> Option<&str> {
        match self {
            Location::Method { parameters, .. } => Some(parameters),
            _ => None,
        }
    }

    /// Canonical path: `pkg`, `pkg.Class` or `pkg.Class#method(params)`.
    ///
    /// Types in the default package have no leading dot.
    pub fn path(&self) -> String {
        match self {
            Location::Package { package } => package.clone(),
            Location::Class {
                package,
                class_name,
            } => qualify(package, class_name),
            Location::Method {
                package,
                class_name,
                method_name,
                parameters,
            } => format!("{}#{method_name}{parameters}", qualify(package, class_name)),
        }
    }

    pub fn is_equal_to_path(&self, path: &str) -> bool {
        self.path() == path
    }
}

fn qualify(package: &str, class_name: &str) -> String {
    if package.is_empty() {
        class_name.to_string()
    } else {
        format!("{package}.{class_name}")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
