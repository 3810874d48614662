use crate::error::ServiceError;
use serde::{Deserialize, Serialize};

/// The managed entity. Identity is assigned by the store on first save and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: Option<u32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub items: Vec<RecordItem>,
}

/// A sub-item attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordItem {
    pub name: String,
}

/// The mutable field set carried by add and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl Record {
    /// Builds a record from request fields, validating them first.
    pub fn from_fields(
        id: Option<u32>,
        fields: RecordFields,
        items: Vec<RecordItem>,
    ) -> Result<Self, ServiceError> {
        validate(&fields)?;
        Ok(Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            address: fields.address,
            city: fields.city,
            telephone: fields.telephone,
            items,
        })
    }

    /// Applies an update's field values. Identity and items are untouched.
    pub fn apply_fields(&mut self, fields: RecordFields) -> Result<(), ServiceError> {
        validate(&fields)?;
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.address = fields.address;
        self.city = fields.city;
        self.telephone = fields.telephone;
        Ok(())
    }
}

fn validate(fields: &RecordFields) -> Result<(), ServiceError> {
    let mandatory = [
        ("first_name", &fields.first_name),
        ("last_name", &fields.last_name),
        ("address", &fields.address),
        ("city", &fields.city),
    ];
    for (label, value) in mandatory {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!(
                "{label} must not be blank"
            )));
        }
    }
    if fields.telephone.is_empty()
        || fields.telephone.len() > 12
        || !fields.telephone.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ServiceError::Validation(
            "telephone must be a numeric string of at most 12 digits".into(),
        ));
    }
    Ok(())
}
