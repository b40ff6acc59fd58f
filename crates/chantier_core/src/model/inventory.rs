//! Equipment inventory and supplier directory.

use crate::model::validation::{require_email, require_text};
use crate::model::{Entity, EntityKind, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type MaterialId = String;
pub type SupplierId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialStatus {
    #[serde(rename = "Disponible")]
    Available,
    #[serde(rename = "Sur Chantier")]
    InUse,
    #[serde(rename = "En Maintenance")]
    Maintenance,
    #[serde(rename = "Hors Service")]
    Broken,
}

impl MaterialStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Disponible",
            Self::InUse => "Sur Chantier",
            Self::Maintenance => "En Maintenance",
            Self::Broken => "Hors Service",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub status: MaterialStatus,
    /// Warehouse or site name.
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Entity for Material {
    const KIND: EntityKind = EntityKind::Material;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        require_text("location", &self.location)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDraft {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub status: MaterialStatus,
    pub location: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub last_maintenance: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MaterialDraft {
    pub fn into_material(self, id: MaterialId) -> Material {
        Material {
            id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            status: self.status,
            location: self.location,
            serial_number: self.serial_number,
            last_maintenance: self.last_maintenance,
            image_url: self.image_url,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub status: Option<MaterialStatus>,
    pub location: Option<String>,
    pub serial_number: Option<Option<String>>,
    pub last_maintenance: Option<Option<NaiveDate>>,
    pub image_url: Option<Option<String>>,
}

impl MaterialPatch {
    pub fn apply(&self, material: &mut Material) {
        if let Some(name) = &self.name {
            material.name = name.clone();
        }
        if let Some(category) = &self.category {
            material.category = category.clone();
        }
        if let Some(quantity) = self.quantity {
            material.quantity = quantity;
        }
        if let Some(status) = self.status {
            material.status = status;
        }
        if let Some(location) = &self.location {
            material.location = location.clone();
        }
        if let Some(serial_number) = &self.serial_number {
            material.serial_number = serial_number.clone();
        }
        if let Some(last_maintenance) = self.last_maintenance {
            material.last_maintenance = last_maintenance;
        }
        if let Some(image_url) = &self.image_url {
            material.image_url = image_url.clone();
        }
    }
}

impl From<MaterialDraft> for MaterialPatch {
    fn from(draft: MaterialDraft) -> Self {
        Self {
            name: Some(draft.name),
            category: Some(draft.category),
            quantity: Some(draft.quantity),
            status: Some(draft.status),
            location: Some(draft.location),
            serial_number: Some(draft.serial_number),
            last_maintenance: Some(draft.last_maintenance),
            image_url: Some(draft.image_url),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplierStatus {
    #[serde(rename = "Actif")]
    Active,
    #[serde(rename = "Inactif")]
    Inactive,
    #[serde(rename = "Bloqué")]
    Blacklisted,
}

impl SupplierStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Actif",
            Self::Inactive => "Inactif",
            Self::Blacklisted => "Bloqué",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub category: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: SupplierStatus,
    /// 1 (worst) to 5 (best).
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_order_date: Option<NaiveDate>,
}

impl Entity for Supplier {
    const KIND: EntityKind = EntityKind::Supplier;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        require_text("contact_name", &self.contact_name)?;
        require_email(&self.email)?;
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange(self.rating));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDraft {
    pub name: String,
    pub category: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: SupplierStatus,
    pub rating: u8,
    #[serde(default)]
    pub last_order_date: Option<NaiveDate>,
}

impl SupplierDraft {
    pub fn into_supplier(self, id: SupplierId) -> Supplier {
        Supplier {
            id,
            name: self.name,
            category: self.category,
            contact_name: self.contact_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            status: self.status,
            rating: self.rating,
            last_order_date: self.last_order_date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<SupplierStatus>,
    pub rating: Option<u8>,
    pub last_order_date: Option<Option<NaiveDate>>,
}

impl SupplierPatch {
    pub fn apply(&self, supplier: &mut Supplier) {
        if let Some(name) = &self.name {
            supplier.name = name.clone();
        }
        if let Some(category) = &self.category {
            supplier.category = category.clone();
        }
        if let Some(contact_name) = &self.contact_name {
            supplier.contact_name = contact_name.clone();
        }
        if let Some(email) = &self.email {
            supplier.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            supplier.phone = phone.clone();
        }
        if let Some(address) = &self.address {
            supplier.address = address.clone();
        }
        if let Some(status) = self.status {
            supplier.status = status;
        }
        if let Some(rating) = self.rating {
            supplier.rating = rating;
        }
        if let Some(last_order_date) = self.last_order_date {
            supplier.last_order_date = last_order_date;
        }
    }
}

impl From<SupplierDraft> for SupplierPatch {
    fn from(draft: SupplierDraft) -> Self {
        Self {
            name: Some(draft.name),
            category: Some(draft.category),
            contact_name: Some(draft.contact_name),
            email: Some(draft.email),
            phone: Some(draft.phone),
            address: Some(draft.address),
            status: Some(draft.status),
            rating: Some(draft.rating),
            last_order_date: Some(draft.last_order_date),
        }
    }
}
