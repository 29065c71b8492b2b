//! Common regex patterns for financial document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Amount tokens (US format: $1,234.56, optional sign or accounting
    // parentheses)
    pub static ref AMOUNT: Regex = Regex::new(
        r"[-+]?\(?\$\s?[\d,]+(?:\.\d{1,2})?\)?|[-+]?\(?\d+(?:,\d{3})*\.\d{2}\)?|[-+]?\(?\d{1,3}(?:,\d{3})+\)?"
    ).unwrap();

    // Bank statement fields
    pub static ref ACCOUNT_HOLDER: Regex = Regex::new(
        r"(?im)^.*?account\s+holder(?:\s+name)?\s*[:#]?\s*(.+)$"
    ).unwrap();

    pub static ref ACCOUNT_NUMBER: Regex = Regex::new(
        r"(?i)account\s*(?:number|no\.?|#)\s*[:#]?\s*(\d[\d\s-]{3,20}\d)"
    ).unwrap();

    pub static ref OPENING_BALANCE: Regex = Regex::new(
        r"(?i)(?:opening|beginning|previous)\s+balance\s*:?\s*([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)"
    ).unwrap();

    pub static ref CLOSING_BALANCE: Regex = Regex::new(
        r"(?i)(?:closing|ending|new)\s+balance\s*:?\s*([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)"
    ).unwrap();

    pub static ref STATEMENT_PERIOD: Regex = Regex::new(
        r"(?i)(?:statement\s+period|period\s+covered|statement\s+dates|statement\s+cycle)\s*:?\s*(.+)"
    ).unwrap();

    // One transaction per line: date, description, amount, optional
    // running balance
    pub static ref TRANSACTION_LINE: Regex = Regex::new(
        r"(?m)^\s*(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4})\s+(.+?)\s+([-+]?\(?\$?\s?[\d,]+\.\d{2}\)?)(?:\s+([-+]?\(?\$?\s?[\d,]+\.\d{2}\)?))?\s*$"
    ).unwrap();

    // Dates
    pub static ref DATE_MDY: Regex = Regex::new(
        r"\b(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[/.\-](\d{1,2})[/.\-](\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_MONTH_FIRST: Regex = Regex::new(
        r"(?i)\b(Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b"
    ).unwrap();

    pub static ref DATE_DAY_FIRST: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?,?\s+(\d{4})\b"
    ).unwrap();

    // Tax return fields
    pub static ref TAXPAYER_NAME: Regex = Regex::new(
        r"(?i)(?:taxpayer(?:'s)?\s+name|name\s+of\s+taxpayer)\s*:?\s*(.+)"
    ).unwrap();

    pub static ref TAX_YEAR: Regex = Regex::new(
        r"(?i)(?:tax\s+year|for\s+(?:the\s+)?(?:calendar\s+|fiscal\s+)?year)\s*:?\s*(\d{4})"
    ).unwrap();

    pub static ref TOTAL_INCOME: Regex = Regex::new(
        r"(?i)(?:total|gross)\s+income\s*:?\s*([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)"
    ).unwrap();

    pub static ref TAXABLE_INCOME: Regex = Regex::new(
        r"(?i)taxable\s+income\s*:?\s*([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)"
    ).unwrap();

    pub static ref TAX_PAID: Regex = Regex::new(
        r"(?i)(?:total\s+tax|tax\s+paid|tax\s+withheld|tax\s+due)\s*:?\s*([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)"
    ).unwrap();

    // "Standard deduction ... 13,850.00" style lines
    pub static ref DEDUCTION_LINE: Regex = Regex::new(
        r"(?im)^\s*(.{3,60}?(?:deduction|credit|contribution|exemption)s?)\s*:?\s+([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)\s*$"
    ).unwrap();

    pub static ref SSN: Regex = Regex::new(
        r"\b\d{3}-\d{2}-\d{4}\b"
    ).unwrap();

    pub static ref EIN: Regex = Regex::new(
        r"\b\d{2}-\d{7}\b"
    ).unwrap();

    // Business license fields
    pub static ref BUSINESS_NAME: Regex = Regex::new(
        r"(?i)(?:business|company|legal|entity)\s+name\s*:?\s*(.+)"
    ).unwrap();

    pub static ref LICENSE_NUMBER: Regex = Regex::new(
        r"(?i)(?:license|permit|registration|certificate)\s*(?:number|no\.?|#)\s*:?\s*([A-Za-z0-9][A-Za-z0-9/\-]*)"
    ).unwrap();

    pub static ref ISSUE_DATE: Regex = Regex::new(
        r"(?i)(?:date\s+of\s+issue|issue\s+date|issued\s+(?:on)?|effective\s+date)\s*:?\s*(.+)"
    ).unwrap();

    pub static ref EXPIRATION_DATE: Regex = Regex::new(
        r"(?i)(?:expiration\s+date|expiry\s+date|expires?\s*(?:on)?|valid\s+(?:through|until))\s*:?\s*(.+)"
    ).unwrap();

    pub static ref BUSINESS_TYPE: Regex = Regex::new(
        r"(?i)(?:business\s+type|type\s+of\s+business|entity\s+type|classification)\s*:?\s*(.+)"
    ).unwrap();

    pub static ref BUSINESS_ADDRESS: Regex = Regex::new(
        r"(?i)(?:business|premises|location)\s+address\s*:?\s*(.+)"
    ).unwrap();

    // Financial statement fields
    pub static ref COMPANY_NAME: Regex = Regex::new(
        r"(?i)(?:company|corporation)\s+name\s*:?\s*(.+)"
    ).unwrap();

    pub static ref REVENUE: Regex = Regex::new(
        r"(?i)(?:total\s+revenue|revenue|total\s+sales|net\s+sales)\s*:?\s*([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)"
    ).unwrap();

    pub static ref EXPENSES: Regex = Regex::new(
        r"(?i)(?:total\s+(?:operating\s+)?expenses|operating\s+expenses)\s*:?\s*([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)"
    ).unwrap();

    pub static ref NET_INCOME: Regex = Regex::new(
        r"(?i)(net\s+(?:income|profit|earnings|loss))\s*:?\s*([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)"
    ).unwrap();

    pub static ref TOTAL_ASSETS: Regex = Regex::new(
        r"(?i)total\s+assets\s*:?\s*([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)"
    ).unwrap();

    pub static ref TOTAL_LIABILITIES: Regex = Regex::new(
        r"(?i)total\s+liabilities\s*:?\s*([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)"
    ).unwrap();

    pub static ref TOTAL_EQUITY: Regex = Regex::new(
        r"(?i)total\s+(?:shareholders'?\s+|stockholders'?\s+|owner'?s'?\s+)?equity\s*:?\s*([-+]?\(?\$?\s?[\d,]+(?:\.\d{1,2})?\)?)"
    ).unwrap();

    // Format checks used by the validator
    pub static ref ACCOUNT_NUMBER_FORMAT: Regex = Regex::new(
        r"^\d{6,17}$"
    ).unwrap();

    pub static ref LICENSE_NUMBER_FORMAT: Regex = Regex::new(
        r"^[A-Za-z0-9][A-Za-z0-9/\-]{2,18}[A-Za-z0-9]$"
    ).unwrap();

    pub static ref SSN_FORMAT: Regex = Regex::new(
        r"^\d{3}-\d{2}-\d{4}$"
    ).unwrap();

    pub static ref EIN_FORMAT: Regex = Regex::new(
        r"^\d{2}-\d{7}$"
    ).unwrap();
}
