// 提交接口的固定响应文案，前端直接展示

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Form submitted and email sent successfully!";

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields.";

pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to process submission. Check server logs.";

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";

pub const RATE_LIMITED_MESSAGE: &str = "Too many submissions, please try again later.";
