//! Related-collection lookups for one case.

use log::debug;
use serde_json::Value;

use crate::document::{Document, SpecDocumentFilter, flatten_nested_documents};
use crate::spec::{SpecCollectionNames, StoreError};
use crate::store::DocumentStore;

/// Documents related to a case, looked up by its `case_id`.
pub trait CaseDataProvider {
    fn find_settlements(&self, case_id: &Value) -> Result<Vec<Document>, StoreError>;

    /// Plans of every settlement of the case, each tagged with its `settlement_id`.
    fn find_settlement_plans(&self, case_id: &Value) -> Result<Vec<Document>, StoreError>;

    fn find_payments(&self, case_id: &Value) -> Result<Vec<Document>, StoreError>;

    /// Commissions whose `money_transaction_id` appears among the case's payments.
    fn find_commissions(&self, case_id: &Value) -> Result<Vec<Document>, StoreError>;

    /// Label of arrears band `code`; `None` when the reference or key is missing.
    fn find_arrears_band_value(&self, code: &str) -> Result<Option<Value>, StoreError>;
}

/// [`CaseDataProvider`] over any [`DocumentStore`].
pub struct StoreCaseDataProvider<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    collections: SpecCollectionNames,
}

impl<'a, S: DocumentStore + ?Sized> StoreCaseDataProvider<'a, S> {
    pub fn new(store: &'a S, collections: SpecCollectionNames) -> Self {
        Self { store, collections }
    }

    fn filter_case(case_id: &Value) -> SpecDocumentFilter {
        SpecDocumentFilter::new().where_eq("case_id", case_id.clone())
    }
}

impl<S: DocumentStore + ?Sized> CaseDataProvider for StoreCaseDataProvider<'_, S> {
    fn find_settlements(&self, case_id: &Value) -> Result<Vec<Document>, StoreError> {
        self.store
            .find(&self.collections.settlements, &Self::filter_case(case_id))
    }

    fn find_settlement_plans(&self, case_id: &Value) -> Result<Vec<Document>, StoreError> {
        let l_settlements = self.find_settlements(case_id)?;
        Ok(flatten_nested_documents(
            &l_settlements,
            "settlement_plan",
            &["settlement_id"],
        ))
    }

    fn find_payments(&self, case_id: &Value) -> Result<Vec<Document>, StoreError> {
        self.store
            .find(&self.collections.payments, &Self::filter_case(case_id))
    }

    fn find_commissions(&self, case_id: &Value) -> Result<Vec<Document>, StoreError> {
        let l_transaction_ids = self.store.distinct(
            &self.collections.payments,
            "money_transaction_id",
            &Self::filter_case(case_id),
        )?;
        debug!(
            "Case {case_id} has {} distinct money transactions.",
            l_transaction_ids.len()
        );

        let mut l_commissions = Vec::new();
        for transaction_id in l_transaction_ids {
            l_commissions.extend(self.store.find(
                &self.collections.commissions,
                &SpecDocumentFilter::new().where_eq("money_transaction_id", transaction_id),
            )?);
        }
        Ok(l_commissions)
    }

    fn find_arrears_band_value(&self, code: &str) -> Result<Option<Value>, StoreError> {
        let reference = self
            .store
            .find_one(&self.collections.arrears_bands, &SpecDocumentFilter::new())?;
        Ok(reference.and_then(|document| document.get(code).cloned()))
    }
}
