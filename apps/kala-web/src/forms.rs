//! Form bodies posted by the pages, and their conversion to domain inputs.
//!
//! Every field defaults to an empty string so a missing field surfaces as a
//! `ValidationError` (400) rather than an extractor rejection.

use serde::Deserialize;

use kala_core::error::CoreResult;
use kala_core::validation::{
    parse_amount, parse_optional_amount, parse_quantity, parse_sale_date, parse_stock,
    validate_email, validate_name, validate_password,
};
use kala_core::{CatalogKind, PaymentMethod, Role, ValidationError};
use kala_db::{NewProduct, NewProductSale, NewService, NewServiceSale};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// What the admin catalog form produces.
#[derive(Debug)]
pub enum CatalogEntry {
    Service(NewService),
    Product(NewProduct),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogForm {
    pub kind: String,
    pub name: String,
    pub efectivo: String,
    pub transf: String,
    pub stock: String,
}

impl CatalogForm {
    pub fn parse(self) -> CoreResult<CatalogEntry> {
        let kind: CatalogKind = self.kind.parse()?;
        let name = validate_name("name", &self.name)?;
        let cash_price = parse_amount("efectivo", &self.efectivo)?;
        let transfer_price = parse_optional_amount("transf", &self.transf)?;

        Ok(match kind {
            CatalogKind::Service => CatalogEntry::Service(NewService {
                name,
                cash_price,
                transfer_price,
            }),
            CatalogKind::Product => CatalogEntry::Product(NewProduct {
                name,
                cash_price,
                transfer_price,
                stock: parse_stock(&self.stock)?,
            }),
        })
    }
}

/// A validated user form. The password is still plain text.
#[derive(Debug)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
}

impl UserForm {
    pub fn parse(self) -> CoreResult<UserInput> {
        validate_password(&self.password)?;
        Ok(UserInput {
            name: validate_name("name", &self.name)?,
            email: validate_email(&self.email)?,
            role: self.role.parse()?,
            password: self.password,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServiceSaleForm {
    pub date: String,
    pub client: String,
    pub service_id: String,
    pub medio: String,
}

impl ServiceSaleForm {
    pub fn parse(self, user_id: &str) -> CoreResult<NewServiceSale> {
        Ok(NewServiceSale {
            sale_date: parse_sale_date(&self.date)?,
            client_name: validate_name("client", &self.client)?,
            service_id: required_id("service_id", &self.service_id)?,
            payment_method: self.medio.parse::<PaymentMethod>()?,
            user_id: user_id.to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductSaleForm {
    pub date: String,
    pub product_id: String,
    pub medio: String,
    pub qty: String,
}

impl ProductSaleForm {
    pub fn parse(self, user_id: &str) -> CoreResult<NewProductSale> {
        Ok(NewProductSale {
            sale_date: parse_sale_date(&self.date)?,
            product_id: required_id("product_id", &self.product_id)?,
            payment_method: self.medio.parse::<PaymentMethod>()?,
            quantity: parse_quantity(&self.qty)?,
            user_id: user_id.to_string(),
        })
    }
}

fn required_id(field: &str, raw: &str) -> Result<String, ValidationError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(id.to_string())
}
