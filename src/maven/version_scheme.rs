//! Maven's "generic" version scheme - just enough of it to order versions and to tell a version
//!  range from a plain version.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use anyhow::anyhow;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // separators ('.', '-', '_') are dropped, digit / non-digit transitions split items
    static ref ITEM_REGEX: Regex = Regex::new(r"\d+|[^\d._-]+").unwrap();
}


/// Source of truth for deciding whether a dependency's version string denotes a range
pub trait VersionScheme {
    fn parse_version_range(&self, range: &str) -> anyhow::Result<VersionRange>;
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum VersionKind {
    Exact,
    Range,
}

/// NB: this is deliberately optimistic - whatever parses as a range *is* a range, and everything
///  else is treated as an exact version without checking that it is well-formed
pub fn classify_version(scheme: &dyn VersionScheme, version: &str) -> VersionKind {
    match scheme.parse_version_range(version) {
        Ok(_) => VersionKind::Range,
        Err(_) => VersionKind::Exact,
    }
}


#[derive(Debug, Default, Clone, Copy)]
pub struct GenericVersionScheme;

impl VersionScheme for GenericVersionScheme {
    fn parse_version_range(&self, range: &str) -> anyhow::Result<VersionRange> {
        if range.len() < 2 {
            return Err(anyhow!("invalid version range {}, too short", range));
        }

        let lower_inclusive = if range.starts_with('[') {
            true
        }
        else if range.starts_with('(') {
            false
        }
        else {
            return Err(anyhow!("invalid version range {}, a range must start with either [ or (", range));
        };

        let upper_inclusive = if range.ends_with(']') {
            true
        }
        else if range.ends_with(')') {
            false
        }
        else {
            return Err(anyhow!("invalid version range {}, a range must end with either ] or )", range));
        };

        let inner = &range[1..range.len() - 1];

        match inner.find(',') {
            None => {
                if !lower_inclusive || !upper_inclusive {
                    return Err(anyhow!("invalid version range {}, single version must be surrounded by []", range));
                }
                let version = GenericVersion::new(inner.trim());
                Ok(VersionRange {
                    lower: Some(VersionBound { version: version.clone(), inclusive: true }),
                    upper: Some(VersionBound { version, inclusive: true }),
                })
            }
            Some(comma) => {
                let lower = inner[..comma].trim();
                let upper = inner[comma + 1..].trim();

                // NB: unions like "[1,2),[3,4)" are version constraints, not a single range
                if upper.contains(',') {
                    return Err(anyhow!("invalid version range {}, bounds of wrong format", range));
                }

                let lower = (!lower.is_empty())
                    .then(|| VersionBound { version: GenericVersion::new(lower), inclusive: lower_inclusive });
                let upper = (!upper.is_empty())
                    .then(|| VersionBound { version: GenericVersion::new(upper), inclusive: upper_inclusive });

                if let (Some(lower), Some(upper)) = (&lower, &upper) {
                    if upper.version < lower.version {
                        return Err(anyhow!("invalid version range {}, lower bound must not be greater than upper bound", range));
                    }
                }

                Ok(VersionRange { lower, upper })
            }
        }
    }
}


#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VersionBound {
    pub version: GenericVersion,
    pub inclusive: bool,
}

/// `None` for a bound means "unbounded" on that side
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VersionRange {
    pub lower: Option<VersionBound>,
    pub upper: Option<VersionBound>,
}
impl VersionRange {
    pub fn contains(&self, version: &GenericVersion) -> bool {
        let above_lower = match &self.lower {
            None => true,
            Some(b) if b.inclusive => version >= &b.version,
            Some(b) => version > &b.version,
        };
        let below_upper = match &self.upper {
            None => true,
            Some(b) if b.inclusive => version <= &b.version,
            Some(b) => version < &b.version,
        };
        above_lower && below_upper
    }
}


/// A parsed version string. Parsing never fails - any string is a version, it just may not
///  order the way its author intended.
#[derive(Debug, Clone)]
pub struct GenericVersion {
    source: String,
    items: Vec<Item>,
}
impl GenericVersion {
    pub fn new(version: &str) -> GenericVersion {
        GenericVersion {
            source: version.to_string(),
            items: parse_items(version),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}
impl Display for GenericVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}
impl PartialEq for GenericVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for GenericVersion {}
impl PartialOrd for GenericVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for GenericVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        for i in 0..len {
            let rel = match (self.items.get(i), other.items.get(i)) {
                (Some(a), Some(b)) => a.cmp_item(b),
                (Some(a), None) => a.cmp_padding(),
                (None, Some(b)) => b.cmp_padding().reverse(),
                (None, None) => Ordering::Equal,
            };
            if rel != Ordering::Equal {
                return rel;
            }
        }
        Ordering::Equal
    }
}


#[derive(Debug, Clone, Eq, PartialEq)]
enum Item {
    /// well-known qualifier, 0 being a release
    Qualifier(i32),
    /// any other text, lower case
    Text(String),
    /// digits without leading zeros
    Number(String),
}
impl Item {
    fn kind_rank(&self) -> u8 {
        match self {
            Item::Qualifier(_) => 0,
            Item::Text(_) => 1,
            Item::Number(_) => 2,
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Item::Qualifier(rank) => *rank == 0,
            Item::Text(_) => false,
            Item::Number(n) => n == "0",
        }
    }

    fn cmp_item(&self, other: &Item) -> Ordering {
        match (self, other) {
            (Item::Qualifier(a), Item::Qualifier(b)) => a.cmp(b),
            (Item::Text(a), Item::Text(b)) => a.cmp(b),
            (Item::Number(a), Item::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    /// compare against the implicit padding of a shorter version, i.e. "0" / "ga"
    fn cmp_padding(&self) -> Ordering {
        match self {
            Item::Qualifier(rank) => rank.cmp(&0),
            Item::Text(_) => Ordering::Greater,
            Item::Number(_) if self.is_zero() => Ordering::Equal,
            Item::Number(_) => Ordering::Greater,
        }
    }
}

fn parse_items(version: &str) -> Vec<Item> {
    let mut items = Vec::new();

    for m in ITEM_REGEX.find_iter(version) {
        let token = m.as_str();

        if token.starts_with(|c: char| c.is_ascii_digit()) {
            let trimmed = token.trim_start_matches('0');
            items.push(Item::Number(if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }));
            continue;
        }

        // single letter aliases only count when glued to a number, e.g. "1.0-a1" but not "1.0-a"
        let followed_by_digit = version[m.end()..].starts_with(|c: char| c.is_ascii_digit());
        let lower = token.to_lowercase();
        match qualifier_rank(&lower, followed_by_digit) {
            Some(rank) => items.push(Item::Qualifier(rank)),
            None => items.push(Item::Text(lower)),
        }
    }

    while items.last().map_or(false, Item::is_zero) {
        items.pop();
    }
    items
}

fn qualifier_rank(qualifier: &str, followed_by_digit: bool) -> Option<i32> {
    match qualifier {
        "alpha" => Some(-5),
        "beta" => Some(-4),
        "milestone" => Some(-3),
        "cr" | "rc" => Some(-2),
        "snapshot" => Some(-1),
        "ga" | "final" | "release" => Some(0),
        "sp" => Some(1),
        "a" if followed_by_digit => Some(-5),
        "b" if followed_by_digit => Some(-4),
        "m" if followed_by_digit => Some(-3),
        _ => None,
    }
}
