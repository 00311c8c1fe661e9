pub mod env {
    pub const PREFIX: &str = "FLEAMARKET";
    pub const SEPARATOR: &str = "__";
    pub const LIST_SEPARATOR: &str = ",";
}

pub const DEFAULT_CONFIG_FILE: &str = "config/default";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const CODE_TTL_IN_SECONDS: u64 = 300;
    pub const COLLABORATOR_TIMEOUT_IN_MILLIS: u64 = 2000;
    pub const SESSION_TTL_IN_SECONDS: i64 = 3600;

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
