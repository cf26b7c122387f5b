//! Conversions between persistence entities and DTOs.
//!
//! Every conversion is total: an absent nested order or credential maps to
//! an absent nested value on the other side. The `apply_to` helpers merge a
//! DTO onto an already stored entity for updates; fields missing from the DTO
//! keep their stored values.

use crate::domain::{Credential, Payment, User};
use crate::dto::{CredentialDto, OrderDto, PaymentDto, UserDto};

// ===== Payment =====

impl From<Payment> for PaymentDto {
    fn from(payment: Payment) -> Self {
        Self {
            payment_id: payment.payment_id,
            is_payed: Some(payment.is_payed),
            payment_status: Some(payment.payment_status),
            order_dto: payment.order_id.map(OrderDto::reference),
        }
    }
}

impl From<PaymentDto> for Payment {
    fn from(dto: PaymentDto) -> Self {
        Self {
            payment_id: dto.payment_id,
            is_payed: dto.is_payed.unwrap_or(false),
            payment_status: dto.payment_status.unwrap_or_default(),
            order_id: dto.order_dto.and_then(|o| o.order_id),
        }
    }
}

impl PaymentDto {
    /// Overwrites `payment` with every field present in this DTO.
    ///
    /// The payment's identifier is never touched.
    pub fn apply_to(self, payment: &mut Payment) {
        if let Some(is_payed) = self.is_payed {
            payment.is_payed = is_payed;
        }
        if let Some(status) = self.payment_status {
            payment.payment_status = status;
        }
        if let Some(order_id) = self.order_dto.and_then(|o| o.order_id) {
            payment.order_id = Some(order_id);
        }
    }
}

// ===== Credential =====

impl From<Credential> for CredentialDto {
    fn from(credential: Credential) -> Self {
        Self {
            credential_id: credential.credential_id,
            username: credential.username,
            password: credential.password,
            role_based_authority: Some(credential.role_based_authority),
            is_enabled: Some(credential.is_enabled),
            is_account_non_expired: Some(credential.is_account_non_expired),
            is_account_non_locked: Some(credential.is_account_non_locked),
            is_credentials_non_expired: Some(credential.is_credentials_non_expired),
        }
    }
}

impl From<CredentialDto> for Credential {
    fn from(dto: CredentialDto) -> Self {
        Self {
            credential_id: dto.credential_id,
            username: dto.username,
            password: dto.password,
            role_based_authority: dto.role_based_authority.unwrap_or_default(),
            is_enabled: dto.is_enabled.unwrap_or(true),
            is_account_non_expired: dto.is_account_non_expired.unwrap_or(true),
            is_account_non_locked: dto.is_account_non_locked.unwrap_or(true),
            is_credentials_non_expired: dto.is_credentials_non_expired.unwrap_or(true),
        }
    }
}

impl CredentialDto {
    /// Overwrites `credential` with this DTO, keeping the stored id and any
    /// flag the DTO leaves out.
    pub fn apply_to(self, credential: &mut Credential) {
        credential.username = self.username;
        credential.password = self.password;
        if let Some(role) = self.role_based_authority {
            credential.role_based_authority = role;
        }
        if let Some(v) = self.is_enabled {
            credential.is_enabled = v;
        }
        if let Some(v) = self.is_account_non_expired {
            credential.is_account_non_expired = v;
        }
        if let Some(v) = self.is_account_non_locked {
            credential.is_account_non_locked = v;
        }
        if let Some(v) = self.is_credentials_non_expired {
            credential.is_credentials_non_expired = v;
        }
    }
}

// ===== User =====

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            image_url: user.image_url,
            email: user.email,
            phone: user.phone,
            credential_dto: user.credential.map(CredentialDto::from),
        }
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            user_id: dto.user_id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            image_url: dto.image_url,
            email: dto.email,
            phone: dto.phone,
            credential: dto.credential_dto.map(Credential::from),
        }
    }
}

impl UserDto {
    /// Overwrites `user` with every field present in this DTO.
    ///
    /// A stored credential is updated in place; a user without one takes the
    /// DTO's credential as new.
    pub fn apply_to(self, user: &mut User) {
        fn set(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }

        set(&mut user.first_name, self.first_name);
        set(&mut user.last_name, self.last_name);
        set(&mut user.image_url, self.image_url);
        set(&mut user.email, self.email);
        set(&mut user.phone, self.phone);

        if let Some(dto) = self.credential_dto {
            match user.credential.as_mut() {
                Some(stored) => dto.apply_to(stored),
                None => user.credential = Some(dto.into()),
            }
        }
    }
}
