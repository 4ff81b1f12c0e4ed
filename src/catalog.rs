use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{FeeLedgerError, Result};
use crate::types::{Class, ClassId, FeeType, FeeTypeClassLink, FeeTypeId, SchoolId};

/// in-memory, tenant-scoped snapshot of the fee catalog: classes,
/// fee types and their links, as normalized by the storage collaborator.
///
/// every read takes the caller's school id explicitly; a row that exists
/// under a different school is reported as not found, never returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeCatalog {
    schools: HashSet<SchoolId>,
    classes: Vec<Class>,
    fee_types: Vec<FeeType>,
    links: Vec<FeeTypeClassLink>,
}

impl FeeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// register a tenant; reads for unregistered schools fail
    pub fn register_school(&mut self, school_id: SchoolId) {
        self.schools.insert(school_id);
    }

    /// add a class to its school's catalog
    pub fn add_class(&mut self, class: Class) -> Result<()> {
        if !self.schools.contains(&class.school_id) {
            return Err(FeeLedgerError::SchoolNotFound {
                school_id: class.school_id,
            });
        }
        self.classes.retain(|c| c.id != class.id);
        self.classes.push(class);
        Ok(())
    }

    /// add a fee type to its school's catalog
    pub fn add_fee_type(&mut self, fee_type: FeeType) -> Result<()> {
        if !self.schools.contains(&fee_type.school_id) {
            return Err(FeeLedgerError::SchoolNotFound {
                school_id: fee_type.school_id,
            });
        }
        self.fee_types.retain(|f| f.id != fee_type.id);
        self.fee_types.push(fee_type);
        Ok(())
    }

    /// link a fee type to a class; both must exist under the same school
    pub fn link(&mut self, school_id: SchoolId, fee_type_id: FeeTypeId, class_id: ClassId) -> Result<()> {
        self.class(school_id, class_id)?;
        self.fee_type(school_id, fee_type_id)?;

        let link = FeeTypeClassLink {
            fee_type_id,
            class_id,
            school_id,
        };
        if !self.links.contains(&link) {
            self.links.push(link);
        }
        Ok(())
    }

    /// remove a fee-type-to-class link
    pub fn unlink(&mut self, school_id: SchoolId, fee_type_id: FeeTypeId, class_id: ClassId) -> Result<()> {
        self.class(school_id, class_id)?;
        self.fee_type(school_id, fee_type_id)?;
        self.links.retain(|l| {
            !(l.school_id == school_id && l.fee_type_id == fee_type_id && l.class_id == class_id)
        });
        Ok(())
    }

    /// all classes of a school, ordered by name then id
    pub fn list_classes(&self, school_id: SchoolId) -> Result<Vec<Class>> {
        if !self.schools.contains(&school_id) {
            return Err(FeeLedgerError::SchoolNotFound { school_id });
        }
        let mut classes: Vec<Class> = self
            .classes
            .iter()
            .filter(|c| c.school_id == school_id)
            .cloned()
            .collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(classes)
    }

    /// fee types linked to a class, ordered by name then id
    pub fn list_fee_types_for_class(&self, school_id: SchoolId, class_id: ClassId) -> Result<Vec<FeeType>> {
        self.class(school_id, class_id)?;

        let linked: HashSet<FeeTypeId> = self
            .links
            .iter()
            .filter(|l| l.school_id == school_id && l.class_id == class_id)
            .map(|l| l.fee_type_id)
            .collect();

        let mut fee_types: Vec<FeeType> = self
            .fee_types
            .iter()
            .filter(|f| f.school_id == school_id && linked.contains(&f.id))
            .cloned()
            .collect();
        fee_types.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(fee_types)
    }

    /// look up a single class, scoped by tenant
    pub fn class(&self, school_id: SchoolId, class_id: ClassId) -> Result<&Class> {
        self.classes
            .iter()
            .find(|c| c.id == class_id && c.school_id == school_id)
            .ok_or(FeeLedgerError::ClassNotFound { class_id })
    }

    /// look up a single fee type, scoped by tenant
    pub fn fee_type(&self, school_id: SchoolId, fee_type_id: FeeTypeId) -> Result<&FeeType> {
        self.fee_types
            .iter()
            .find(|f| f.id == fee_type_id && f.school_id == school_id)
            .ok_or(FeeLedgerError::FeeTypeNotFound { fee_type_id })
    }
}
