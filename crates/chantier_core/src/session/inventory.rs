//! Material and supplier use cases.

use crate::id::{new_id, MATERIAL_PREFIX, SUPPLIER_PREFIX};
use crate::model::inventory::{
    Material, MaterialDraft, MaterialPatch, MaterialStatus, Supplier, SupplierDraft, SupplierPatch,
};
use crate::report::inventory::{
    filter_materials, filter_suppliers, material_stats, supplier_categories, MaterialStats,
};
use crate::session::{logged, Session, SessionError, SessionResult};
use crate::store::InsertAt;

impl Session {
    pub fn create_material(&mut self, draft: MaterialDraft) -> SessionResult<&Material> {
        let material = draft.into_material(new_id(MATERIAL_PREFIX));
        let result = self
            .materials
            .insert(material, InsertAt::Front)
            .map_err(SessionError::from);
        logged("material_create", result)
    }

    pub fn update_material(&mut self, material_id: &str, patch: &MaterialPatch) -> SessionResult<&Material> {
        let result = self
            .materials
            .update(material_id, |material| patch.apply(material))
            .map_err(SessionError::from);
        logged("material_update", result)
    }

    pub fn delete_material(&mut self, material_id: &str) -> SessionResult<Material> {
        let result = self.materials.remove(material_id).map_err(SessionError::from);
        logged("material_delete", result)
    }

    pub fn create_supplier(&mut self, draft: SupplierDraft) -> SessionResult<&Supplier> {
        let supplier = draft.into_supplier(new_id(SUPPLIER_PREFIX));
        let result = self
            .suppliers
            .insert(supplier, InsertAt::Front)
            .map_err(SessionError::from);
        logged("supplier_create", result)
    }

    pub fn update_supplier(&mut self, supplier_id: &str, patch: &SupplierPatch) -> SessionResult<&Supplier> {
        let result = self
            .suppliers
            .update(supplier_id, |supplier| patch.apply(supplier))
            .map_err(SessionError::from);
        logged("supplier_update", result)
    }

    pub fn delete_supplier(&mut self, supplier_id: &str) -> SessionResult<Supplier> {
        let result = self.suppliers.remove(supplier_id).map_err(SessionError::from);
        logged("supplier_delete", result)
    }

    pub fn material_stats(&self) -> MaterialStats {
        material_stats(self.materials.list())
    }

    pub fn search_materials(&self, search: &str, status: Option<MaterialStatus>) -> Vec<&Material> {
        filter_materials(self.materials.list(), search, status)
    }

    pub fn search_suppliers(&self, search: &str, category: Option<&str>) -> Vec<&Supplier> {
        filter_suppliers(self.suppliers.list(), search, category)
    }

    pub fn supplier_categories(&self) -> Vec<&str> {
        supplier_categories(self.suppliers.list())
    }
}
