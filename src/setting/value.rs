//! Type-erased setting values held in the accessor cache.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::LogLevel;

/// A resolved setting value of any supported type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// 32-bit integer (ports, counts, timeouts in seconds)
    Int(i32),
    /// 64-bit integer (sizes)
    Long(i64),
    /// Boolean flag
    Bool(bool),
    /// Free-form string
    Text(String),
    /// File-system path
    Path(PathBuf),
    /// Time span
    Duration(Duration),
    /// Log level
    Level(LogLevel),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Path(v) => write!(f, "{}", v.display()),
            Self::Duration(v) => write!(f, "{}ms", v.as_millis()),
            Self::Level(v) => write!(f, "{v}"),
        }
    }
}

/// Conversion between a typed setting value and its cached [`Value`].
///
/// `from_value` returns `None` when the cached value holds another type,
/// which only happens if two settings share a key.
pub trait SettingType: Clone + Send + Sync + 'static {
    /// Wraps the typed value for caching.
    fn into_value(self) -> Value;

    /// Recovers the typed value from the cache.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_setting_type {
    ($ty:ty, $variant:ident) => {
        impl SettingType for $ty {
            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_setting_type!(i32, Int);
impl_setting_type!(i64, Long);
impl_setting_type!(bool, Bool);
impl_setting_type!(String, Text);
impl_setting_type!(PathBuf, Path);
impl_setting_type!(Duration, Duration);
impl_setting_type!(LogLevel, Level);
