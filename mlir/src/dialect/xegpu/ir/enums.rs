/*!
# XeGPU Enums and Enum Attributes

- include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/Dialect/XeGPU/IR/XeGPUAttrs.td>
*/

use core::{fmt, str::FromStr};

use thiserror::Error;

/// Cache policy for one cache level of a memory operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    Cached,
    Uncached,
    Streaming,
    ReadInvalidate,
    WriteBack,
    WriteThrough
}

impl CachePolicy {
    pub const ALL: [CachePolicy; 6] = [
        CachePolicy::Cached,
        CachePolicy::Uncached,
        CachePolicy::Streaming,
        CachePolicy::ReadInvalidate,
        CachePolicy::WriteBack,
        CachePolicy::WriteThrough
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            CachePolicy::Cached => "cached",
            CachePolicy::Uncached => "uncached",
            CachePolicy::Streaming => "streaming",
            CachePolicy::ReadInvalidate => "read_invalidate",
            CachePolicy::WriteBack => "write_back",
            CachePolicy::WriteThrough => "write_through"
        }
    }
}

/// Prints the bare keyword; the `{:#}` alternate form prints the attribute, `#xegpu.cache_hint<cached>`.
impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "#xegpu.cache_hint<{}>", self.as_str())
        } else {
            f.write_str(self.as_str())
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown cache hint `{0}`")]
pub struct ParseCachePolicyError(pub String);

/// Accepts both the bare keyword and the attribute form.
impl FromStr for CachePolicy {
    type Err = ParseCachePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keyword = s
            .trim()
            .strip_prefix("#xegpu.cache_hint<")
            .and_then(|rest| rest.strip_suffix('>'))
            .unwrap_or(s.trim());
        CachePolicy::ALL
            .into_iter()
            .find(|policy| policy.as_str() == keyword)
            .ok_or_else(|| ParseCachePolicyError(s.to_string()))
    }
}

/// Optional cache hints for the three cache levels; an absent hint leaves the hardware default in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CacheHints {
    pub l1_hint: Option<CachePolicy>,
    pub l2_hint: Option<CachePolicy>,
    pub l3_hint: Option<CachePolicy>
}

impl CacheHints {
    pub const ATTR_NAMES: [&'static str; 3] = ["l1_hint", "l2_hint", "l3_hint"];

    pub fn with_l1(mut self, policy: CachePolicy) -> Self {
        self.l1_hint = Some(policy);
        self
    }

    pub fn with_l2(mut self, policy: CachePolicy) -> Self {
        self.l2_hint = Some(policy);
        self
    }

    pub fn with_l3(mut self, policy: CachePolicy) -> Self {
        self.l3_hint = Some(policy);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.l1_hint.is_none() && self.l2_hint.is_none() && self.l3_hint.is_none()
    }

    /// The hints that are present, paired with their attribute names.
    pub fn present(&self) -> impl Iterator<Item = (&'static str, CachePolicy)> {
        Self::ATTR_NAMES
            .into_iter()
            .zip([self.l1_hint, self.l2_hint, self.l3_hint])
            .filter_map(|(name, hint)| hint.map(|policy| (name, policy)))
    }

    /// Set the hint named `name`; returns false if `name` is not a cache hint attribute.
    pub(crate) fn set(&mut self, name: &str, policy: CachePolicy) -> bool {
        let slot = match name {
            "l1_hint" => &mut self.l1_hint,
            "l2_hint" => &mut self.l2_hint,
            "l3_hint" => &mut self.l3_hint,
            _ => return false
        };
        *slot = Some(policy);
        true
    }
}
