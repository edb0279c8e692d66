use serde::Serialize;

/// Success envelope: every 2xx body is `{ "data": ... }`, keeping the top
/// level free for the error shape (`{ "error", "code" }`) on failures.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
