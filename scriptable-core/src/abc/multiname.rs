//! Namespaces, namespace sets and multinames
//!
//! Multiname records store their sub-indices as single bytes, unlike the
//! varint indices used everywhere else in the container.

use alloc::vec::Vec;

use super::index::{NamespaceIndex, NamespaceSetIndex, StringIndex};
use crate::decode::{read_table, Decode};
use crate::format::constants::abc::{multiname as tag, namespace as ns_tag};
use crate::reader::Cursor;
use crate::{DecodeError, Result};

/// Namespace kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NamespaceKind {
    #[default]
    Public,
    Private,
    Namespace,
    Internal,
    Protected,
    Explicit,
    StaticProtected,
}

impl NamespaceKind {
    /// Map a wire tag to its kind
    pub const fn from_tag(value: u8) -> Option<Self> {
        match value {
            ns_tag::PRIVATE => Some(Self::Private),
            ns_tag::NAMESPACE => Some(Self::Namespace),
            ns_tag::PUBLIC => Some(Self::Public),
            ns_tag::INTERNAL => Some(Self::Internal),
            ns_tag::PROTECTED => Some(Self::Protected),
            ns_tag::EXPLICIT => Some(Self::Explicit),
            ns_tag::STATIC_PROTECTED => Some(Self::StaticProtected),
            _ => None,
        }
    }

    /// The wire tag of this kind
    pub const fn tag(self) -> u8 {
        match self {
            Self::Private => ns_tag::PRIVATE,
            Self::Namespace => ns_tag::NAMESPACE,
            Self::Public => ns_tag::PUBLIC,
            Self::Internal => ns_tag::INTERNAL,
            Self::Protected => ns_tag::PROTECTED,
            Self::Explicit => ns_tag::EXPLICIT,
            Self::StaticProtected => ns_tag::STATIC_PROTECTED,
        }
    }
}

/// Namespace pool entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Namespace {
    pub kind: NamespaceKind,
    /// Namespace name (URI) in the string pool
    pub name: StringIndex,
}

impl Decode for Namespace {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let offset = cursor.position();
        let tag = cursor.read_byte()?;
        let kind = NamespaceKind::from_tag(tag)
            .ok_or(DecodeError::UnknownNamespaceKind { offset, tag })?;
        let name = StringIndex::decode(cursor)?;
        Ok(Self { kind, name })
    }
}

/// Namespace-set pool entry: an ordered list of namespaces
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamespaceSet {
    pub namespaces: Vec<NamespaceIndex>,
}

impl Decode for NamespaceSet {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            namespaces: read_table(cursor)?,
        })
    }
}

/// Multiname pool entry
///
/// `Any` is the zero value held by the reserved slot 0; it is never decoded
/// from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Multiname {
    #[default]
    Any,
    QName {
        ns: NamespaceIndex,
        name: StringIndex,
    },
    QNameA {
        ns: NamespaceIndex,
        name: StringIndex,
    },
    RTQName {
        name: StringIndex,
    },
    RTQNameA,
    RTQNameL,
    RTQNameLA,
    Multiname {
        name: StringIndex,
        ns_set: NamespaceSetIndex,
    },
    MultinameA {
        name: StringIndex,
        ns_set: NamespaceSetIndex,
    },
    MultinameL {
        ns_set: NamespaceSetIndex,
    },
    MultinameLA {
        ns_set: NamespaceSetIndex,
    },
}

impl Multiname {
    /// Wire tag of this kind (`None` for the reserved `Any`)
    pub const fn tag(&self) -> Option<u8> {
        Some(match self {
            Self::Any => return None,
            Self::QName { .. } => tag::QNAME,
            Self::QNameA { .. } => tag::QNAME_A,
            Self::RTQName { .. } => tag::RTQNAME,
            Self::RTQNameA => tag::RTQNAME_A,
            Self::RTQNameL => tag::RTQNAME_L,
            Self::RTQNameLA => tag::RTQNAME_LA,
            Self::Multiname { .. } => tag::MULTINAME,
            Self::MultinameA { .. } => tag::MULTINAME_A,
            Self::MultinameL { .. } => tag::MULTINAME_L,
            Self::MultinameLA { .. } => tag::MULTINAME_LA,
        })
    }

    /// Name string, when the record carries one
    pub const fn name(&self) -> Option<StringIndex> {
        match *self {
            Self::QName { name, .. }
            | Self::QNameA { name, .. }
            | Self::RTQName { name }
            | Self::Multiname { name, .. }
            | Self::MultinameA { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Namespace, for qualified names
    pub const fn namespace(&self) -> Option<NamespaceIndex> {
        match *self {
            Self::QName { ns, .. } | Self::QNameA { ns, .. } => Some(ns),
            _ => None,
        }
    }

    /// Namespace set, for multinames
    pub const fn namespace_set(&self) -> Option<NamespaceSetIndex> {
        match *self {
            Self::Multiname { ns_set, .. }
            | Self::MultinameA { ns_set, .. }
            | Self::MultinameL { ns_set }
            | Self::MultinameLA { ns_set } => Some(ns_set),
            _ => None,
        }
    }

    /// Whether this is an attribute name (`@name`)
    pub const fn is_attribute(&self) -> bool {
        matches!(
            self,
            Self::QNameA { .. }
                | Self::RTQNameA
                | Self::RTQNameLA
                | Self::MultinameA { .. }
                | Self::MultinameLA { .. }
        )
    }

    /// Whether part of the name is supplied at runtime
    pub const fn is_runtime(&self) -> bool {
        matches!(
            self,
            Self::RTQName { .. }
                | Self::RTQNameA
                | Self::RTQNameL
                | Self::RTQNameLA
                | Self::MultinameL { .. }
                | Self::MultinameLA { .. }
        )
    }
}

impl Decode for Multiname {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let offset = cursor.position();
        let kind = cursor.read_byte()?;
        let multiname = match kind {
            tag::QNAME | tag::QNAME_A => {
                let ns = NamespaceIndex::read_narrow(cursor)?;
                let name = StringIndex::read_narrow(cursor)?;
                if kind == tag::QNAME {
                    Self::QName { ns, name }
                } else {
                    Self::QNameA { ns, name }
                }
            }
            tag::RTQNAME => Self::RTQName {
                name: StringIndex::read_narrow(cursor)?,
            },
            tag::RTQNAME_A => Self::RTQNameA,
            tag::RTQNAME_L => Self::RTQNameL,
            tag::RTQNAME_LA => Self::RTQNameLA,
            tag::MULTINAME | tag::MULTINAME_A => {
                let name = StringIndex::read_narrow(cursor)?;
                let ns_set = NamespaceSetIndex::read_narrow(cursor)?;
                if kind == tag::MULTINAME {
                    Self::Multiname { name, ns_set }
                } else {
                    Self::MultinameA { name, ns_set }
                }
            }
            tag::MULTINAME_L => Self::MultinameL {
                ns_set: NamespaceSetIndex::read_narrow(cursor)?,
            },
            tag::MULTINAME_LA => Self::MultinameLA {
                ns_set: NamespaceSetIndex::read_narrow(cursor)?,
            },
            _ => return Err(DecodeError::UnknownMultinameKind { offset, tag: kind }),
        };
        Ok(multiname)
    }
}
