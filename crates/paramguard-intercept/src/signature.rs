//! # Method Signatures
//!
//! Builder describing one method's parameters: the declared type of each
//! position in order, and which positions are validated.
//!
//! ```
//! use paramguard_intercept::{DeclaredType, MethodSignature};
//!
//! let signature = MethodSignature::new("UserService::create")
//!     .validated(DeclaredType::schema("CreateUserDto"))
//!     .param(DeclaredType::Untyped)
//!     .validated_at(DeclaredType::Untyped, "body", "BodyDto");
//! assert_eq!(signature.arity(), 3);
//! ```

use paramguard_core::{MethodId, SchemaId};

use crate::declared::DeclaredType;
use crate::registry::ParamRegistration;

/// Parameter declarations of one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    method: MethodId,
    declared: Vec<DeclaredType>,
    registrations: Vec<ParamRegistration>,
}

impl MethodSignature {
    /// Start a signature for `method` with no parameters.
    pub fn new(method: impl Into<MethodId>) -> Self {
        Self {
            method: method.into(),
            declared: Vec::new(),
            registrations: Vec::new(),
        }
    }

    /// Append a parameter that is not validated.
    pub fn param(mut self, declared: DeclaredType) -> Self {
        self.declared.push(declared);
        self
    }

    /// Append a parameter validated against its declared type.
    pub fn validated(mut self, declared: DeclaredType) -> Self {
        let position = self.declared.len();
        self.declared.push(declared);
        self.registrations.push(ParamRegistration::raw(position));
        self
    }

    /// Append a parameter whose value at `target_path` is validated
    /// against `schema`. An empty path validates the argument itself.
    pub fn validated_at(
        mut self,
        declared: DeclaredType,
        target_path: impl Into<String>,
        schema: impl Into<SchemaId>,
    ) -> Self {
        let position = self.declared.len();
        self.declared.push(declared);
        self.registrations
            .push(ParamRegistration::at(position, target_path, schema));
        self
    }

    /// Append a parameter with an arbitrary registration. The
    /// registration's position is set to this parameter's position.
    pub fn registered(
        mut self,
        declared: DeclaredType,
        mut registration: ParamRegistration,
    ) -> Self {
        registration.position = self.declared.len();
        self.declared.push(declared);
        self.registrations.push(registration);
        self
    }

    /// The method this signature describes.
    pub fn method(&self) -> &MethodId {
        &self.method
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.declared.len()
    }

    pub(crate) fn into_parts(self) -> (MethodId, Vec<DeclaredType>, Vec<ParamRegistration>) {
        (self.method, self.declared, self.registrations)
    }
}
