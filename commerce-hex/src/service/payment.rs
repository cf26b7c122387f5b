//! Payment Application Service

use commerce_types::{
    AppError, NotFoundError, Payment, PaymentDto, PaymentId, PaymentRepository, RepoError,
};

/// Application service for payment operations.
///
/// Generic over `R: PaymentRepository` - the adapter is injected at compile time,
/// so tests can run the same logic against an in-memory repo.
pub struct PaymentService<R: PaymentRepository> {
    repo: R,
}

impl<R: PaymentRepository> PaymentService<R> {
    /// Creates a new payment service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Lists all payments.
    #[tracing::instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<PaymentDto>, AppError> {
        let payments = self.repo.find_all().await?;
        Ok(payments.into_iter().map(PaymentDto::from).collect())
    }

    /// Gets a payment by ID.
    #[tracing::instrument(skip(self), fields(payment_id = %id))]
    pub async fn find_by_id(&self, id: PaymentId) -> Result<PaymentDto, AppError> {
        let payment = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(NotFoundError::Payment(id))?;

        Ok(payment.into())
    }

    /// Stores a new payment. Any ID on the DTO is ignored.
    #[tracing::instrument(skip(self, dto))]
    pub async fn save(&self, dto: PaymentDto) -> Result<PaymentDto, AppError> {
        let payment = Payment {
            payment_id: None,
            ..Payment::from(dto)
        };

        let saved = self.repo.save(payment).await?;
        tracing::info!(payment_id = ?saved.payment_id, "payment created");
        Ok(saved.into())
    }

    /// Updates the payment identified by the DTO's own ID.
    #[tracing::instrument(skip(self, dto))]
    pub async fn update(&self, dto: PaymentDto) -> Result<PaymentDto, AppError> {
        let id = dto
            .payment_id
            .ok_or_else(|| AppError::BadRequest("Payment id is required for update".into()))?;

        self.update_by_id(id, dto).await
    }

    /// Updates an existing payment with every field present in the DTO.
    #[tracing::instrument(skip(self, dto), fields(payment_id = %id))]
    pub async fn update_by_id(&self, id: PaymentId, dto: PaymentDto) -> Result<PaymentDto, AppError> {
        let mut payment = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(NotFoundError::Payment(id))?;

        dto.apply_to(&mut payment);

        let saved = self.repo.save(payment).await.map_err(|e| match e {
            RepoError::NotFound => AppError::from(NotFoundError::Payment(id)),
            other => other.into(),
        })?;

        Ok(saved.into())
    }

    /// Deletes a payment. Deleting an unknown ID succeeds.
    #[tracing::instrument(skip(self), fields(payment_id = %id))]
    pub async fn delete_by_id(&self, id: PaymentId) -> Result<(), AppError> {
        self.repo.delete_by_id(id).await?;
        Ok(())
    }
}
