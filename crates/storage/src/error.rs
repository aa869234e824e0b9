use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to initialize token source, error: {source}, location: {location}"))]
    InitializeTokenSource {
        #[snafu(implicit)]
        location: Location,

        source: google_cloud_auth::error::Error,
    },

    #[snafu(display("Failed to acquire access token, error: {source}, location: {location}"))]
    AcquireToken {
        #[snafu(implicit)]
        location: Location,

        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[snafu(display("Unexpected HTTP response, error: {source}, location: {location}"))]
    UnexpectedHttpResponse {
        #[snafu(implicit)]
        location: Location,

        source: reqwest::Error,
    },

    #[snafu(display("Bucket `{bucket}` does not exist, location: {location}"))]
    BucketNotFound {
        #[snafu(implicit)]
        location: Location,

        bucket: String,
    },

    #[snafu(display("Client side error: {message}, status code: {status}, location: {location}"))]
    ClientSide {
        #[snafu(implicit)]
        location: Location,

        status: reqwest::StatusCode,
        message: String,
    },

    #[snafu(display("Server side error: {message}, status code: {status}, location: {location}"))]
    ServerSide {
        #[snafu(implicit)]
        location: Location,

        status: reqwest::StatusCode,
        message: String,
    },
}
