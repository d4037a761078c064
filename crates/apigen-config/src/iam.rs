//! IAM resource references: message fields that carry access-control resource names.

use crate::error::ResolveError;
use crate::schema::IamResourceProto;
use apigen_model::{Field, Model};

/// A field proven to exist on a message type of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IamResource {
    /// Fully-qualified name of the owning message.
    pub message_type: String,
    pub field: Field,
}

impl IamResource {
    pub fn field_name(&self) -> &str {
        &self.field.name
    }
}

/// Resolve IAM resource references, in declaration order.
///
/// Any lookup failure aborts the whole resolution: these references are
/// hand-written and a bad one is a config authoring defect.
pub fn create_iam_resources(
    model: &Model,
    resources: &[IamResourceProto],
) -> Result<Vec<IamResource>, ResolveError> {
    resources
        .iter()
        .map(|resource| {
            let type_ref = model
                .lookup_type(&resource.type_name)
                .ok_or_else(|| ResolveError::TypeNotFound(resource.type_name.clone()))?;
            let message = type_ref
                .type_name()
                .filter(|_| type_ref.is_message())
                .and_then(|name| model.lookup_message(name))
                .ok_or_else(|| ResolveError::TypeNotMessage(type_ref.to_string()))?;
            let field = message.lookup_field(&resource.field).ok_or_else(|| {
                ResolveError::FieldNotFound {
                    type_name: resource.type_name.clone(),
                    field: resource.field.clone(),
                }
            })?;
            Ok(IamResource {
                message_type: message.full_name.clone(),
                field: field.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigen_model::{EnumType, MessageType, PrimitiveType, TypeRef};

    fn model() -> Model {
        let mut model = Model::new();
        model
            .add_message(
                MessageType::new("google.example.v1.Shelf")
                    .with_field("name", TypeRef::primitive(PrimitiveType::String)),
            )
            .add_enum(EnumType {
                full_name: "google.example.v1.Genre".into(),
                values: vec![],
            });
        model
    }

    fn iam(type_name: &str, field: &str) -> IamResourceProto {
        IamResourceProto {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    #[test]
    fn resolves_in_order() {
        let resources =
            create_iam_resources(&model(), &[iam("google.example.v1.Shelf", "name")]).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].message_type, "google.example.v1.Shelf");
        assert_eq!(resources[0].field_name(), "name");
    }

    #[test]
    fn lookup_failures_are_fatal() {
        let model = model();
        assert_eq!(
            create_iam_resources(&model, &[iam("google.example.v1.Nope", "name")]),
            Err(ResolveError::TypeNotFound("google.example.v1.Nope".into()))
        );
        assert_eq!(
            create_iam_resources(&model, &[iam("google.example.v1.Genre", "name")]),
            Err(ResolveError::TypeNotMessage("google.example.v1.Genre".into()))
        );
        assert_eq!(
            create_iam_resources(
                &model,
                &[
                    iam("google.example.v1.Shelf", "name"),
                    iam("google.example.v1.Shelf", "theme"),
                ]
            ),
            Err(ResolveError::FieldNotFound {
                type_name: "google.example.v1.Shelf".into(),
                field: "theme".into(),
            })
        );
    }
}
