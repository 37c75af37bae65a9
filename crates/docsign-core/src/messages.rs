//! User-facing response messages.
//!
//! The product UI is Hebrew; these strings are returned verbatim in `{message}` bodies.

pub const UPLOAD_FIELDS_REQUIRED: &str = "חובה לצרף קובץ ומייל";
pub const INVALID_EMAIL: &str = "כתובת המייל אינה תקינה";
pub const UPLOAD_SUCCESS: &str = "המייל נשלח בהצלחה!";
pub const UPLOAD_NOTIFICATION_FAILED: &str = "שגיאה בשליחת מייל";
pub const FILE_TOO_LARGE: &str = "הקובץ גדול מדי";

pub const SIGN_FIELDS_REQUIRED: &str = "חסרים נתונים לחתימה";
pub const DOCUMENT_NOT_FOUND: &str = "קובץ לא נמצא";
pub const SIGNING_FAILED: &str = "שגיאה במהלך החתימה";
pub const SIGN_SUCCESS: &str = "נחתם בהצלחה!";
pub const SIGNED_COPY_NOT_SENT: &str = "המסמך נחתם אך שליחת המייל נכשלה";

pub const RESEND_SUCCESS: &str = "קישור החתימה נשלח שוב";

pub const REQUEST_TIMED_OUT: &str = "הבקשה ארכה זמן רב מדי, נסו שוב";
pub const INTERNAL_ERROR: &str = "שגיאת שרת פנימית";
pub const STORAGE_ERROR: &str = "שגיאה בגישה לאחסון";

/// Prefix of the stamp drawn on the signed document ("Signature: ").
pub const SIGNATURE_PREFIX: &str = "חתימה: ";
