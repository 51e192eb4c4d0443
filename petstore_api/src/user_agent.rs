/// User agent sent with every request.
pub fn get_user_agent() -> &'static str {
    concat!("petstore/", env!("CARGO_PKG_VERSION"))
}
