use serde::{Deserialize, Serialize};

use anvilcrm_core::{CustomerId, DomainError, DomainResult};

/// Input fields for creating a customer (pre-validation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Customer record.
///
/// Constructed only through [`Customer::create`], which runs field
/// validation, so a held `Customer` is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    phone: Option<String>,
}

impl Customer {
    /// Validate the input fields and build a customer record.
    ///
    /// Email uniqueness is a store-level constraint and is not checked here.
    pub fn create(id: CustomerId, input: NewCustomer) -> DomainResult<Self> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let email = input.email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(DomainError::validation(format!("invalid email: {email}")));
        }

        let phone = match input.phone {
            Some(p) => {
                let p = p.trim().to_string();
                if p.is_empty() {
                    None
                } else if is_valid_phone(&p) {
                    Some(p)
                } else {
                    return Err(DomainError::validation(
                        "phone number must be in format +1234567890 or 123-456-7890",
                    ));
                }
            }
            None => None,
        };

        Ok(Self {
            id,
            name,
            email,
            phone,
        })
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

/// Minimal email shape check: one `@`, non-empty local part, domain with a dot.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.contains(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    domain.split_once('.').is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Accepted phone formats: `+<10-15 digits>`, `<10-15 digits>`, or `ddd-ddd-dddd`.
fn is_valid_phone(phone: &str) -> bool {
    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    let bare = phone.strip_prefix('+').unwrap_or(phone);
    if digits_only(bare) && (10..=15).contains(&bare.len()) {
        return true;
    }

    let parts: Vec<&str> = phone.split('-').collect();
    matches!(parts.as_slice(),
        [a, b, c] if a.len() == 3 && b.len() == 3 && c.len() == 4
            && digits_only(a) && digits_only(b) && digits_only(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, phone: Option<&str>) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
        }
    }

    #[test]
    fn create_accepts_valid_fields() {
        let c = Customer::create(
            CustomerId::new(),
            input("Alice", "alice@example.com", Some("+1234567890")),
        )
        .unwrap();
        assert_eq!(c.name(), "Alice");
        assert_eq!(c.email(), "alice@example.com");
        assert_eq!(c.phone(), Some("+1234567890"));
    }

    #[test]
    fn create_accepts_missing_phone() {
        let c = Customer::create(CustomerId::new(), input("Bob", "bob@example.com", None)).unwrap();
        assert_eq!(c.phone(), None);
    }

    #[test]
    fn create_accepts_dashed_phone() {
        let c = Customer::create(
            CustomerId::new(),
            input("Carol", "carol@example.com", Some("123-456-7890")),
        )
        .unwrap();
        assert_eq!(c.phone(), Some("123-456-7890"));
    }

    #[test]
    fn create_rejects_empty_name() {
        let err =
            Customer::create(CustomerId::new(), input("   ", "a@b.co", None)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_malformed_email() {
        for bad in ["plainaddress", "a@", "@b.co", "a@nodot", "a b@c.co", "a@@b.co"] {
            let err = Customer::create(CustomerId::new(), input("Dave", bad, None)).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "accepted {bad:?}");
        }
    }

    #[test]
    fn create_rejects_malformed_phone() {
        for bad in ["12345", "+123", "123-45-6789", "abc-def-ghij", "+12345678901234567"] {
            let err = Customer::create(
                CustomerId::new(),
                input("Eve", "eve@example.com", Some(bad)),
            )
            .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "accepted {bad:?}");
        }
    }

    #[test]
    fn create_trims_whitespace() {
        let c = Customer::create(
            CustomerId::new(),
            input("  Frank  ", "  frank@example.com  ", None),
        )
        .unwrap();
        assert_eq!(c.name(), "Frank");
        assert_eq!(c.email(), "frank@example.com");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every accepted bare phone is 10-15 digits.
            #[test]
            fn accepted_bare_phones_are_digit_runs(digits in "[0-9]{1,20}") {
                let accepted = Customer::create(
                    CustomerId::new(),
                    input("P", "p@example.com", Some(&digits)),
                )
                .is_ok();
                prop_assert_eq!(accepted, (10..=15).contains(&digits.len()));
            }

            /// Property: validation never panics on arbitrary input.
            #[test]
            fn create_is_total(name in ".{0,40}", email in ".{0,40}", phone in ".{0,20}") {
                let _ = Customer::create(
                    CustomerId::new(),
                    input(&name, &email, Some(&phone)),
                );
            }
        }
    }
}
