use diesel::prelude::*;

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Validated create command.
///
/// Both fields are already trimmed and non-empty when this value exists.
#[derive(Debug, Insertable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Partial update command.
///
/// `None` fields are left untouched by the changeset. Present fields are
/// written exactly as received, including empty strings.
#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUser {
    /// Returns true when no field would be changed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    /// Applies the present fields to an existing user in place.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_user_is_empty() {
        assert!(UpdateUser::default().is_empty());
        assert!(
            !UpdateUser {
                name: Some(String::new()),
                email: None,
            }
            .is_empty()
        );
    }

    #[test]
    fn test_update_user_apply_keeps_absent_fields() {
        let mut user = User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };

        UpdateUser {
            name: None,
            email: Some(" new@example.com".to_string()),
        }
        .apply_to(&mut user);

        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, " new@example.com");
    }
}
