//! Service wiring: the auth stack assembled over one directory and one
//! signing secret.

use std::sync::Arc;

use chrono::Duration;

use gatekey_auth::{AccountService, AdminService, Gate, TokenService, UserDirectory};

/// The four service surfaces the routes call into.
pub struct AppServices {
    pub account: AccountService,
    pub tokens: Arc<TokenService>,
    pub gate: Arc<Gate>,
    pub admin: AdminService,
}

impl AppServices {
    pub fn new(
        secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(
            secret,
            Arc::clone(&directory),
            access_ttl,
            refresh_ttl,
        ));
        let gate = Arc::new(Gate::new(secret, Arc::clone(&directory)));
        let account = AccountService::new(Arc::clone(&directory), Arc::clone(&tokens));
        let admin = AdminService::new(directory, Arc::clone(&gate));

        Self {
            account,
            tokens,
            gate,
            admin,
        }
    }
}
