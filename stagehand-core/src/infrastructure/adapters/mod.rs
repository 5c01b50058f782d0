pub mod s3;
pub mod slack;
pub mod snowflake;

pub use s3::S3LinkSigner;
pub use slack::SlackWebhookNotifier;
pub use snowflake::SnowflakeSqlApi;
