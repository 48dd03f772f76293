//! Typed clients for each REST resource.
//!
//! ARCHITECTURE
//! ============
//! Service structs borrow the shared `ApiClient` and only translate typed
//! arguments into paths and bodies. Origin detection, bearer headers and
//! 401 handling all happen in the pipeline underneath.

pub mod auth;
pub mod cashflow;
pub mod invoices;
pub mod models;
pub mod openai;
pub mod organizations;
pub mod payments;
pub mod users;
pub mod vendors;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use crate::net::ApiClient;

pub use auth::AuthService;
pub use cashflow::CashflowService;
pub use invoices::InvoiceService;
pub use openai::OpenAiService;
pub use organizations::OrganizationService;
pub use payments::PaymentService;
pub use users::UserService;
pub use vendors::VendorService;

impl ApiClient {
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    #[must_use]
    pub fn invoices(&self) -> InvoiceService<'_> {
        InvoiceService::new(self)
    }

    #[must_use]
    pub fn vendors(&self) -> VendorService<'_> {
        VendorService::new(self)
    }

    #[must_use]
    pub fn payments(&self) -> PaymentService<'_> {
        PaymentService::new(self)
    }

    #[must_use]
    pub fn organizations(&self) -> OrganizationService<'_> {
        OrganizationService::new(self)
    }

    #[must_use]
    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    #[must_use]
    pub fn cashflow(&self) -> CashflowService<'_> {
        CashflowService::new(self)
    }

    #[must_use]
    pub fn openai(&self) -> OpenAiService<'_> {
        OpenAiService::new(self)
    }
}
