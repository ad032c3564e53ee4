/// A literal parameter passed to a [`TypeConverter`](crate::TypeConverter)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Param {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'static str),
    Char(char),
}

impl Param {
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Param::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Param::Int(value) => Some(value),
            _ => None,
        }
    }

    /// Integers widen to floats
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Param::Float(value) => Some(value),
            Param::Int(value) => Some(value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match *self {
            Param::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match *self {
            Param::Char(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<&'static str> for Param {
    fn from(value: &'static str) -> Self {
        Param::Str(value)
    }
}

impl From<char> for Param {
    fn from(value: char) -> Self {
        Param::Char(value)
    }
}
