use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    routing::{get, post},
};
use fleamarket_adapters::{
    config::AllowedOrigins,
    http::routes::{
        CollaboratorTimeout, bought, favorites, login, login_by_code, reset_password, sales,
        selling, signup, sold, stats, verification,
    },
};
use fleamarket_application::VerificationService;
use fleamarket_core::{
    CodeStore, CredentialHasher, GoodsRepository, Notifier, SessionIssuer, UserRepository,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Account and goods API of the fleamarket
pub struct MarketService {
    router: Router,
}

impl MarketService {
    /// Create a new MarketService from its collaborators
    ///
    /// # Arguments
    /// * `verification_service` - Code issuing and checking, already configured with its TTL
    /// * `user_repository` - Accounts (must be Clone)
    /// * `goods_repository` - Goods relations (must be Clone)
    /// * `hasher` - Password hashing
    /// * `session_issuer` - Bearer token issuing and decoding
    /// * `collaborator_timeout` - Upper bound for every repository call a route makes
    ///
    /// Each route only receives the state it needs.
    pub fn new<C, N, U, G, H, S>(
        verification_service: VerificationService<C, N>,
        user_repository: U,
        goods_repository: G,
        hasher: H,
        session_issuer: S,
        collaborator_timeout: Duration,
    ) -> Self
    where
        C: CodeStore + Clone + 'static,
        N: Notifier + Clone + 'static,
        U: UserRepository + Clone + 'static,
        G: GoodsRepository + Clone + 'static,
        H: CredentialHasher + Clone + 'static,
        S: SessionIssuer + Clone + 'static,
    {
        let timeout = CollaboratorTimeout(collaborator_timeout);

        let router = Router::new()
            // Issuing codes only needs the verification service
            .route("/verification", post(verification::<C, N>))
            .with_state(verification_service.clone())
            // Signup and reset both check a code, then hash a password
            .route("/signup", post(signup::<C, N, U, H>))
            .route("/reset-password", post(reset_password::<C, N, U, H>))
            .with_state((
                verification_service.clone(),
                user_repository.clone(),
                hasher.clone(),
                timeout,
            ))
            // Password login never touches the code store
            .route("/login", post(login::<U, H, S>))
            .with_state((
                user_repository.clone(),
                hasher,
                session_issuer.clone(),
                timeout,
            ))
            .route("/login-by-code", post(login_by_code::<C, N, U, S>))
            .with_state((
                verification_service,
                user_repository.clone(),
                session_issuer.clone(),
                timeout,
            ))
            // Public listings of any seller
            .route("/goods/sales", get(sales::<G, U>))
            .route("/goods/selling", get(selling::<G, U>))
            .with_state((goods_repository.clone(), user_repository.clone(), timeout))
            // Views of the bearer's own goods
            .route("/goods/sold", get(sold::<G, U, S>))
            .route("/goods/favorites", get(favorites::<G, U, S>))
            .route("/goods/bought", get(bought::<G, U, S>))
            .route("/goods/stats", get(stats::<G, U, S>))
            .with_state((goods_repository, user_repository, session_issuer, timeout));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the MarketService into a router that can be nested into another application
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the market service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Market service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
