//! ABC container decoding
//!
//! The container is read in one pass in a fixed order: the seven constant
//! pools, then methods, metadata, the shared class count with its instance
//! and class tables, scripts and method bodies. Later tables hold indices
//! into earlier ones; nothing is resolved while decoding.

use alloc::vec::Vec;

pub mod class;
pub mod index;
pub mod method;
pub mod multiname;
pub mod pool;
pub mod trait_info;

pub use class::{ClassInfo, InstanceInfo, ScriptInfo, TraitSet};
pub use index::{
    ClassIndex, MetadataIndex, MethodIndex, MultinameIndex, NamespaceIndex, NamespaceSetIndex,
    StringIndex,
};
pub use method::{ExceptionInfo, Metadata, MetadataItem, MethodBody, MethodSignature, OptionalValue};
pub use multiname::{Multiname, Namespace, NamespaceKind, NamespaceSet};
pub use pool::{read_pool, ConstantPool};
pub use trait_info::{SlotTrait, Trait, TraitKind};

use crate::decode::{read_exact, read_table};
use crate::format::read_abc_version;
use crate::reader::Cursor;
use crate::text::RawString;
use crate::Result;

/// Fully decoded ABC container
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbcFile {
    /// Version marker as read (always the supported version)
    pub version: u32,
    pub ints: ConstantPool<i32>,
    pub uints: ConstantPool<u32>,
    pub doubles: ConstantPool<f64>,
    pub strings: ConstantPool<RawString>,
    pub namespaces: ConstantPool<Namespace>,
    pub namespace_sets: ConstantPool<NamespaceSet>,
    pub multinames: ConstantPool<Multiname>,
    pub methods: Vec<MethodSignature>,
    pub metadata: Vec<Metadata>,
    /// Same length as `classes`
    pub instances: Vec<InstanceInfo>,
    /// Same length as `instances`
    pub classes: Vec<ClassInfo>,
    pub scripts: Vec<ScriptInfo>,
    pub method_bodies: Vec<MethodBody>,
}

/// Decode an ABC container from `bytes`
///
/// Returns the complete container or the first error; nothing partially
/// decoded is ever handed back.
pub fn decode_abc(bytes: &[u8]) -> Result<AbcFile> {
    let mut cursor = Cursor::new(bytes);
    let version = read_abc_version(&mut cursor)?;

    let ints = read_pool(&mut cursor)?;
    let uints = read_pool(&mut cursor)?;
    let doubles = read_pool(&mut cursor)?;
    let strings = read_pool(&mut cursor)?;
    let namespaces = read_pool(&mut cursor)?;
    let namespace_sets = read_pool(&mut cursor)?;
    let multinames = read_pool(&mut cursor)?;

    let methods = read_table(&mut cursor)?;
    let metadata = read_table(&mut cursor)?;

    // One count drives both class tables
    let class_count = cursor.read_avm_usize()?;
    let instances: Vec<InstanceInfo> = read_exact(&mut cursor, class_count)?;
    let classes: Vec<ClassInfo> = read_exact(&mut cursor, class_count)?;
    debug_assert_eq!(instances.len(), classes.len());

    let scripts = read_table(&mut cursor)?;
    let method_bodies = read_table(&mut cursor)?;

    let abc = AbcFile {
        version,
        ints,
        uints,
        doubles,
        strings,
        namespaces,
        namespace_sets,
        multinames,
        methods,
        metadata,
        instances,
        classes,
        scripts,
        method_bodies,
    };

    tracing::debug!(
        strings = abc.strings.len(),
        multinames = abc.multinames.len(),
        methods = abc.methods.len(),
        classes = abc.class_count(),
        scripts = abc.scripts.len(),
        bodies = abc.method_bodies.len(),
        trailing = cursor.remaining(),
        "decoded ABC container"
    );

    Ok(abc)
}

impl AbcFile {
    /// Decode an ABC container from `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        decode_abc(bytes)
    }

    /// Number of classes (instance-info and class-info entries)
    pub fn class_count(&self) -> usize {
        self.instances.len()
    }

    /// Instance and class records paired by class index
    pub fn class_pairs(&self) -> impl Iterator<Item = (&InstanceInfo, &ClassInfo)> {
        self.instances.iter().zip(self.classes.iter())
    }

    pub fn int(&self, index: u32) -> Option<i32> {
        self.ints.get(index as usize).copied()
    }

    pub fn uint(&self, index: u32) -> Option<u32> {
        self.uints.get(index as usize).copied()
    }

    pub fn double(&self, index: u32) -> Option<f64> {
        self.doubles.get(index as usize).copied()
    }

    pub fn string(&self, index: StringIndex) -> Option<&RawString> {
        self.strings.get(index.as_usize())
    }

    pub fn namespace(&self, index: NamespaceIndex) -> Option<&Namespace> {
        self.namespaces.get(index.as_usize())
    }

    pub fn namespace_set(&self, index: NamespaceSetIndex) -> Option<&NamespaceSet> {
        self.namespace_sets.get(index.as_usize())
    }

    pub fn multiname(&self, index: MultinameIndex) -> Option<&Multiname> {
        self.multinames.get(index.as_usize())
    }

    pub fn method(&self, index: MethodIndex) -> Option<&MethodSignature> {
        self.methods.get(index.as_usize())
    }

    pub fn metadata_entry(&self, index: MetadataIndex) -> Option<&Metadata> {
        self.metadata.get(index.as_usize())
    }

    pub fn instance(&self, index: ClassIndex) -> Option<&InstanceInfo> {
        self.instances.get(index.as_usize())
    }

    pub fn class(&self, index: ClassIndex) -> Option<&ClassInfo> {
        self.classes.get(index.as_usize())
    }

    /// Body of `method`, if the container provides one
    pub fn method_body_for(&self, method: MethodIndex) -> Option<&MethodBody> {
        self.method_bodies.iter().find(|body| body.method == method)
    }

    /// Name string of a multiname, for kinds that carry one
    pub fn qualified_name(&self, index: MultinameIndex) -> Option<&RawString> {
        self.string(self.multiname(index)?.name()?)
    }

    /// Name string of a namespace
    pub fn namespace_name(&self, index: NamespaceIndex) -> Option<&RawString> {
        self.string(self.namespace(index)?.name)
    }
}
