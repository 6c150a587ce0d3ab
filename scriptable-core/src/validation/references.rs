//! Index range checking for decoded ABC containers

use crate::abc::{
    AbcFile, ClassIndex, MetadataIndex, MethodIndex, Multiname, MultinameIndex, NamespaceIndex,
    NamespaceSetIndex, StringIndex, Trait, TraitKind,
};
use crate::{DecodeError, Result};

/// Verify that every index stored in `abc` addresses an entry of its table
///
/// Pool indices may be 0 (the reserved slot). Method, metadata and class
/// indices point into plain tables and must be below their length. Optional
/// parameter values are not checked since their pool depends on the value
/// kind.
pub fn check_references(abc: &AbcFile) -> Result<()> {
    let check = Checker { abc };

    for (_, ns) in abc.namespaces.iter() {
        check.string(ns.name)?;
    }
    for (_, set) in abc.namespace_sets.iter() {
        for &ns in &set.namespaces {
            check.namespace(ns)?;
        }
    }
    for (_, multiname) in abc.multinames.iter() {
        check.multiname_entry(multiname)?;
    }

    for method in &abc.methods {
        check.multiname(method.return_type)?;
        for &param in &method.param_types {
            check.multiname(param)?;
        }
        check.string(method.name)?;
        for &name in &method.param_names {
            check.string(name)?;
        }
    }

    for entry in &abc.metadata {
        check.string(entry.name)?;
        for item in &entry.items {
            check.string(item.key)?;
            check.string(item.value)?;
        }
    }

    for (instance, class) in abc.class_pairs() {
        check.multiname(instance.name)?;
        check.multiname(instance.super_name)?;
        if let Some(ns) = instance.protected_ns {
            check.namespace(ns)?;
        }
        for &interface in &instance.interfaces {
            check.multiname(interface)?;
        }
        check.method(instance.init)?;
        check.traits(&instance.traits)?;
        check.method(class.init)?;
        check.traits(&class.traits)?;
    }

    for script in &abc.scripts {
        check.method(script.init)?;
        check.traits(&script.traits)?;
    }

    for body in &abc.method_bodies {
        check.method(body.method)?;
        for exception in &body.exceptions {
            check.multiname(exception.exception_type)?;
            check.multiname(exception.var_name)?;
        }
        check.traits(&body.traits)?;
    }

    Ok(())
}

struct Checker<'a> {
    abc: &'a AbcFile,
}

fn in_range(pool: &'static str, index: u32, len: usize) -> Result<()> {
    if (index as usize) < len {
        Ok(())
    } else {
        Err(DecodeError::IndexOutOfRange { pool, index, len })
    }
}

impl Checker<'_> {
    fn string(&self, index: StringIndex) -> Result<()> {
        in_range(StringIndex::TABLE, index.0, self.abc.strings.len())
    }

    fn namespace(&self, index: NamespaceIndex) -> Result<()> {
        in_range(NamespaceIndex::TABLE, index.0, self.abc.namespaces.len())
    }

    fn namespace_set(&self, index: NamespaceSetIndex) -> Result<()> {
        in_range(NamespaceSetIndex::TABLE, index.0, self.abc.namespace_sets.len())
    }

    fn multiname(&self, index: MultinameIndex) -> Result<()> {
        in_range(MultinameIndex::TABLE, index.0, self.abc.multinames.len())
    }

    fn method(&self, index: MethodIndex) -> Result<()> {
        in_range(MethodIndex::TABLE, index.0, self.abc.methods.len())
    }

    fn metadata(&self, index: MetadataIndex) -> Result<()> {
        in_range(MetadataIndex::TABLE, index.0, self.abc.metadata.len())
    }

    fn class(&self, index: ClassIndex) -> Result<()> {
        in_range(ClassIndex::TABLE, index.0, self.abc.class_count())
    }

    fn multiname_entry(&self, multiname: &Multiname) -> Result<()> {
        if let Some(name) = multiname.name() {
            self.string(name)?;
        }
        if let Some(ns) = multiname.namespace() {
            self.namespace(ns)?;
        }
        if let Some(set) = multiname.namespace_set() {
            self.namespace_set(set)?;
        }
        Ok(())
    }

    fn traits(&self, traits: &[Trait]) -> Result<()> {
        for item in traits {
            self.multiname(item.name)?;
            match item.kind {
                TraitKind::Slot(slot) | TraitKind::Const(slot) => self.multiname(slot.type_name)?,
                TraitKind::Method { method, .. }
                | TraitKind::Getter { method, .. }
                | TraitKind::Setter { method, .. } => self.method(method)?,
                TraitKind::Class { class, .. } => self.class(class)?,
                TraitKind::Function { function, .. } => self.method(function)?,
            }
            for &entry in &item.metadata {
                self.metadata(entry)?;
            }
        }
        Ok(())
    }
}
