//! Contact serializer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::SerializerError;
use crate::db::{Contact, ContactRepository};
use crate::validators::{self, CharRule, REQUIRED, ValidationErrors};

const NAME: CharRule = CharRule::max(50);
const PHONE_NUMBER: CharRule = CharRule::max(20);
const EMAIL: CharRule = CharRule::max(254);

/// JSON representation of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactData {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "555-0100")]
    pub phone_number: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<Contact> for ContactData {
    fn from(c: Contact) -> Self {
        Self {
            name: c.name,
            phone_number: c.phone_number,
            email: c.email,
        }
    }
}

/// Validates and persists contacts.
pub struct ContactSerializer;

impl ContactSerializer {
    /// Validate a request body.
    ///
    /// Field rules run first, including phone and email uniqueness. The
    /// (name, phone number) pair is only checked once every field is valid.
    pub async fn validate<R: ContactRepository>(
        repo: &R,
        data: &Value,
    ) -> Result<ContactData, SerializerError> {
        let fields = validators::expect_object(data)?;
        let mut errors = ValidationErrors::new();

        let name = required(fields.get("name"), "name", &mut errors, |v| {
            validators::clean_char(v, NAME).map(Option::unwrap_or_default)
        });
        let phone_number = required(
            fields.get("phone_number"),
            "phone_number",
            &mut errors,
            |v| validators::clean_char(v, PHONE_NUMBER).map(Option::unwrap_or_default),
        );
        let email = required(fields.get("email"), "email", &mut errors, |v| {
            validators::clean_email(v, EMAIL)
        });

        if let Some(phone_number) = &phone_number {
            validators::check_unique_phone_number(repo, phone_number, &mut errors).await?;
        }
        if let Some(email) = &email {
            validators::check_unique_email(repo, email, &mut errors).await?;
        }

        let (Some(name), Some(phone_number), Some(email)) = (name, phone_number, email) else {
            return Err(errors.into());
        };
        if !errors.is_empty() {
            return Err(errors.into());
        }

        validators::check_unique_name_and_phone_number(repo, &name, &phone_number, &mut errors)
            .await?;

        Ok(errors.into_result(ContactData {
            name,
            phone_number,
            email,
        })?)
    }

    /// Validate a request body and insert a new contact.
    pub async fn create<R: ContactRepository>(
        repo: &R,
        data: &Value,
    ) -> Result<Contact, SerializerError> {
        let data = Self::validate(repo, data).await?;
        let contact = Contact::new(data.name, data.phone_number, data.email);
        Ok(repo.save(&contact).await?)
    }
}

/// Run `clean` on a required field, recording any failure under `field`.
fn required<T>(
    value: Option<&Value>,
    field: &str,
    errors: &mut ValidationErrors,
    clean: impl FnOnce(&Value) -> Result<T, String>,
) -> Option<T> {
    let Some(value) = value else {
        errors.add(field, REQUIRED);
        return None;
    };
    match clean(value) {
        Ok(cleaned) => Some(cleaned),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}
