//! Service unit tests against in-memory repositories.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use commerce_types::{
        AppError, CredentialDto, CredentialId, OrderDto, Payment, PaymentDto, PaymentId,
        PaymentRepository, PaymentStatus, RepoError, RoleBasedAuthority, User, UserDto, UserId,
        UserRepository,
    };

    use crate::{PaymentService, UserService};

    /// In-memory payment store handing out sequential ids.
    pub struct MockPaymentRepo {
        rows: Mutex<HashMap<PaymentId, Payment>>,
        next_id: Mutex<i32>,
    }

    impl MockPaymentRepo {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
                next_id: Mutex::new(1),
            }
        }
    }

    #[async_trait]
    impl PaymentRepository for MockPaymentRepo {
        async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Payment>, RepoError> {
            let mut all: Vec<Payment> = self.rows.lock().unwrap().values().cloned().collect();
            all.sort_by_key(|p| p.payment_id);
            Ok(all)
        }

        async fn save(&self, payment: Payment) -> Result<Payment, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            let payment = match payment.payment_id {
                None => {
                    let mut next = self.next_id.lock().unwrap();
                    let id = PaymentId::new(*next);
                    *next += 1;
                    payment.with_id(id)
                }
                Some(id) if !rows.contains_key(&id) => return Err(RepoError::NotFound),
                Some(_) => payment,
            };
            rows.insert(payment.payment_id.unwrap(), payment.clone());
            Ok(payment)
        }

        async fn delete_by_id(&self, id: PaymentId) -> Result<(), RepoError> {
            self.rows.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn delete_all(&self) -> Result<(), RepoError> {
            self.rows.lock().unwrap().clear();
            Ok(())
        }
    }

    /// In-memory user store enforcing unique usernames.
    pub struct MockUserRepo {
        rows: Mutex<HashMap<UserId, User>>,
        next_id: Mutex<i32>,
    }

    impl MockUserRepo {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
                next_id: Mutex::new(1),
            }
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepo {
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<User>, RepoError> {
            let mut all: Vec<User> = self.rows.lock().unwrap().values().cloned().collect();
            all.sort_by_key(|u| u.user_id);
            Ok(all)
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|u| u.username() == Some(username))
                .cloned())
        }

        async fn save(&self, user: User) -> Result<User, RepoError> {
            let mut rows = self.rows.lock().unwrap();

            if let Some(username) = user.username() {
                let taken = rows
                    .values()
                    .any(|u| u.username() == Some(username) && u.user_id != user.user_id);
                if taken {
                    return Err(RepoError::Conflict(format!("username {} taken", username)));
                }
            }

            let mut next = self.next_id.lock().unwrap();
            let mut user = match user.user_id {
                None => {
                    let id = UserId::new(*next);
                    *next += 1;
                    user.with_id(id)
                }
                Some(id) if !rows.contains_key(&id) => return Err(RepoError::NotFound),
                Some(_) => user,
            };

            let user_id = user.user_id.unwrap();
            if let Some(credential) = user.credential.as_mut() {
                if credential.credential_id.is_none() {
                    credential.credential_id = Some(CredentialId::new(user_id.value()));
                }
            }

            rows.insert(user_id, user.clone());
            Ok(user)
        }

        async fn delete_by_id(&self, id: UserId) -> Result<(), RepoError> {
            self.rows.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn delete_all(&self) -> Result<(), RepoError> {
            self.rows.lock().unwrap().clear();
            Ok(())
        }
    }

    fn payment_dto(order_id: i32) -> PaymentDto {
        PaymentDto {
            payment_id: None,
            is_payed: Some(false),
            payment_status: Some(PaymentStatus::NotStarted),
            order_dto: Some(OrderDto::reference(order_id)),
        }
    }

    fn john() -> UserDto {
        UserDto {
            user_id: None,
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            image_url: Some("http://example.com/image.jpg".to_string()),
            email: Some("john.doe@example.com".to_string()),
            phone: Some("1234567890".to_string()),
            credential_dto: Some(CredentialDto::new("johndoe", "password123")),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_payment_success() {
        let service = PaymentService::new(MockPaymentRepo::new());

        let saved = service.save(payment_dto(1)).await.unwrap();

        assert!(saved.payment_id.is_some());
        assert_eq!(saved.is_payed, Some(false));
        assert_eq!(saved.payment_status, Some(PaymentStatus::NotStarted));
        assert_eq!(saved.order_dto.unwrap().order_id, Some(1));
    }

    #[tokio::test]
    async fn test_save_payment_ignores_supplied_id() {
        let service = PaymentService::new(MockPaymentRepo::new());

        let saved = service
            .save(PaymentDto {
                payment_id: Some(PaymentId::new(42)),
                ..payment_dto(1)
            })
            .await
            .unwrap();

        assert_eq!(saved.payment_id, Some(PaymentId::new(1)));
        assert_eq!(service.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_payment_defaults_missing_fields() {
        let service = PaymentService::new(MockPaymentRepo::new());

        let saved = service.save(PaymentDto::default()).await.unwrap();

        assert_eq!(saved.is_payed, Some(false));
        assert_eq!(saved.payment_status, Some(PaymentStatus::NotStarted));
        assert!(saved.order_dto.is_none());
    }

    #[tokio::test]
    async fn test_find_payment_by_id() {
        let service = PaymentService::new(MockPaymentRepo::new());
        let saved = service.save(payment_dto(7)).await.unwrap();

        let found = service.find_by_id(saved.payment_id.unwrap()).await.unwrap();

        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_find_payment_not_found_message() {
        let service = PaymentService::new(MockPaymentRepo::new());

        let err = service.find_by_id(PaymentId::new(-99)).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "Payment with id: -99 not found");
    }

    #[tokio::test]
    async fn test_find_all_payments() {
        let service = PaymentService::new(MockPaymentRepo::new());
        assert!(service.find_all().await.unwrap().is_empty());

        service.save(payment_dto(1)).await.unwrap();
        service.save(payment_dto(2)).await.unwrap();

        let all = service.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|p| p.payment_id.is_some()));
    }

    #[tokio::test]
    async fn test_update_payment() {
        let service = PaymentService::new(MockPaymentRepo::new());
        let saved = service.save(payment_dto(1)).await.unwrap();

        let updated = service
            .update(PaymentDto {
                payment_id: saved.payment_id,
                is_payed: Some(true),
                payment_status: Some(PaymentStatus::Completed),
                order_dto: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.payment_id, saved.payment_id);
        assert_eq!(updated.is_payed, Some(true));
        assert_eq!(updated.payment_status, Some(PaymentStatus::Completed));
        // Absent order keeps the stored one.
        assert_eq!(updated.order_dto.unwrap().order_id, Some(1));
    }

    #[tokio::test]
    async fn test_update_payment_without_id_fails() {
        let service = PaymentService::new(MockPaymentRepo::new());

        let result = service.update(payment_dto(1)).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_missing_payment_fails() {
        let service = PaymentService::new(MockPaymentRepo::new());

        let err = service
            .update_by_id(PaymentId::new(-99), payment_dto(1))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Payment with id: -99 not found");
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_by_id_uses_path_id() {
        let service = PaymentService::new(MockPaymentRepo::new());
        let first = service.save(payment_dto(1)).await.unwrap();
        let second = service.save(payment_dto(2)).await.unwrap();

        let updated = service
            .update_by_id(
                first.payment_id.unwrap(),
                PaymentDto {
                    payment_id: second.payment_id,
                    payment_status: Some(PaymentStatus::InProgress),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.payment_id, first.payment_id);
        let untouched = service.find_by_id(second.payment_id.unwrap()).await.unwrap();
        assert_eq!(untouched.payment_status, Some(PaymentStatus::NotStarted));
    }

    #[tokio::test]
    async fn test_delete_payment() {
        let service = PaymentService::new(MockPaymentRepo::new());
        let saved = service.save(payment_dto(1)).await.unwrap();
        let id = saved.payment_id.unwrap();

        service.delete_by_id(id).await.unwrap();

        assert!(matches!(
            service.find_by_id(id).await,
            Err(AppError::NotFound(_))
        ));
        // Unknown ids are not an error.
        service.delete_by_id(PaymentId::new(-99)).await.unwrap();
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_user_with_credential_defaults() {
        let service = UserService::new(MockUserRepo::new());

        let saved = service.save(john()).await.unwrap();

        assert!(saved.user_id.is_some());
        assert_eq!(saved.first_name.as_deref(), Some("John"));
        let credential = saved.credential_dto.unwrap();
        assert!(credential.credential_id.is_some());
        assert_eq!(credential.username, "johndoe");
        assert_eq!(
            credential.role_based_authority,
            Some(RoleBasedAuthority::RoleUser)
        );
        assert_eq!(credential.is_enabled, Some(true));
        assert_eq!(credential.is_account_non_locked, Some(true));
    }

    #[tokio::test]
    async fn test_find_user_by_id() {
        let service = UserService::new(MockUserRepo::new());
        let saved = service.save(john()).await.unwrap();

        let found = service.find_by_id(saved.user_id.unwrap()).await.unwrap();

        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_find_user_not_found_message() {
        let service = UserService::new(MockUserRepo::new());

        let err = service.find_by_id(UserId::new(-99)).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "User with id: -99 not found");
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let service = UserService::new(MockUserRepo::new());
        let saved = service.save(john()).await.unwrap();

        let found = service.find_by_username("johndoe").await.unwrap();

        assert_eq!(found.user_id, saved.user_id);
    }

    #[tokio::test]
    async fn test_find_by_username_not_found_message() {
        let service = UserService::new(MockUserRepo::new());
        service.save(john()).await.unwrap();

        let err = service
            .find_by_username("nonexistentuser")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "User with username: nonexistentuser not found"
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let service = UserService::new(MockUserRepo::new());
        service.save(john()).await.unwrap();

        let result = service.save(john()).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_user_keeps_absent_fields() {
        let service = UserService::new(MockUserRepo::new());
        let saved = service.save(john()).await.unwrap();

        let updated = service
            .update(UserDto {
                user_id: saved.user_id,
                first_name: Some("Jane".to_string()),
                email: Some("jane.doe@example.com".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.first_name.as_deref(), Some("Jane"));
        assert_eq!(updated.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(updated.last_name.as_deref(), Some("Doe"));
        assert_eq!(updated.credential_dto.unwrap().username, "johndoe");
    }

    #[tokio::test]
    async fn test_update_user_credential_flags() {
        let service = UserService::new(MockUserRepo::new());
        let saved = service.save(john()).await.unwrap();
        let credential_id = saved.credential_dto.as_ref().unwrap().credential_id;

        let updated = service
            .update_by_id(
                saved.user_id.unwrap(),
                UserDto {
                    credential_dto: Some(CredentialDto {
                        is_account_non_locked: Some(false),
                        role_based_authority: Some(RoleBasedAuthority::RoleAdmin),
                        ..CredentialDto::new("johndoe", "password123")
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let credential = updated.credential_dto.unwrap();
        assert_eq!(credential.credential_id, credential_id);
        assert_eq!(credential.is_account_non_locked, Some(false));
        assert_eq!(credential.is_enabled, Some(true));
        assert_eq!(
            credential.role_based_authority,
            Some(RoleBasedAuthority::RoleAdmin)
        );
    }

    #[tokio::test]
    async fn test_update_user_without_id_fails() {
        let service = UserService::new(MockUserRepo::new());

        let result = service.update(john()).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_missing_user_fails() {
        let service = UserService::new(MockUserRepo::new());

        let err = service
            .update_by_id(UserId::new(-99), john())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "User with id: -99 not found");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let service = UserService::new(MockUserRepo::new());
        let saved = service.save(john()).await.unwrap();
        let id = saved.user_id.unwrap();

        service.delete_by_id(id).await.unwrap();

        assert!(service.find_by_id(id).await.is_err());
        assert!(service.find_by_username("johndoe").await.is_err());
        assert!(service.find_all().await.unwrap().is_empty());
        service.delete_by_id(id).await.unwrap();
    }
}
