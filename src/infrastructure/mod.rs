//! Infrastructure: rate limiting state and the Supabase collaborator client

pub mod rate_limiter;
pub mod supabase;

pub use rate_limiter::RequestWindowLimiter;
pub use supabase::SupabaseClient;
