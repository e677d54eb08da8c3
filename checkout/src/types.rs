//! Domain types for the course checkout.
//!
//! The checkout moves through four screens:
//! `List → Details → Paying → Unlocked`, falling back to `Details` with a
//! [`Notice`] whenever order creation, payment or verification fails.

use openroot_razorpay::{Order, PaymentCallback};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency every course is priced in
pub const CURRENCY: &str = "INR";

/// Identifier of a catalog course
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(u32);

impl CourseId {
    /// Creates a new `CourseId`
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the inner value
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Money in integer minor units (paise)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Creates money from minor units
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Creates money from whole rupees
    #[must_use]
    pub const fn from_major(major: u64) -> Self {
        Self(major * 100)
    }

    /// Amount in minor units
    #[must_use]
    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Whole rupees, truncating any paise
    #[must_use]
    pub const fn major(self) -> u64 {
        self.0 / 100
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY}", self.major())
    }
}

/// A read-only catalog entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier
    pub id: CourseId,
    /// Display name, also used as the payment description
    pub name: String,
    /// Price
    pub price: Money,
    /// Duration label, e.g. `4 Months • 16 Classes`
    pub duration_label: String,
    /// Topics covered
    pub highlights: Vec<String>,
    /// Content revealed once the course is paid for (e.g. a group-invite QR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_asset: Option<String>,
}

impl Course {
    /// Creates a course
    #[must_use]
    pub fn new(
        id: CourseId,
        name: impl Into<String>,
        price: Money,
        duration_label: impl Into<String>,
        highlights: &[&str],
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            duration_label: duration_label.into(),
            highlights: highlights.iter().map(ToString::to_string).collect(),
            unlock_asset: None,
        }
    }

    /// Sets the content revealed on unlock
    #[must_use]
    pub fn with_unlock_asset(mut self, asset: impl Into<String>) -> Self {
        self.unlock_asset = Some(asset.into());
        self
    }
}

/// The set of courses on sale
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Creates a catalog from the given courses
    #[must_use]
    pub const fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// The courses Openroot Classes currently sells
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            Course::new(
                CourseId::new(1),
                "Investing & Finance",
                Money::from_major(1769),
                "4 Months • 16 Classes",
                &[
                    "Stock Market From Scratch",
                    "Mutual Funds",
                    "Gold Investments",
                    "Lending Systems",
                    "Smart Fixed Deposits",
                    "Portfolio Building",
                    "AI Systems in Finance",
                ],
            )
            .with_unlock_asset("FinanceQR.png"),
            Course::new(
                CourseId::new(2),
                "Prompt Engineering",
                Money::from_major(1249),
                "2 Months • 8 Classes",
                &[
                    "AI Image Generation",
                    "Text to Video",
                    "Logo Design",
                    "Branding",
                    "Blog Creation",
                    "AI Website Builder",
                    "Resume Builder",
                ],
            )
            .with_unlock_asset("PromptQR.png"),
        ])
    }

    /// Looks up a course by id
    #[must_use]
    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    /// All courses, in display order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }
}

/// Progress of a payment attempt while on the `Paying` screen
#[derive(Clone, Debug, PartialEq)]
pub enum PaymentStage {
    /// Waiting for the order service to mint an order
    CreatingOrder,
    /// Hosted checkout is open for this order
    AwaitingPayment {
        /// Order being paid
        order: Order,
    },
    /// Order service is checking the payment signature
    Verifying {
        /// Order being verified
        order: Order,
    },
}

impl PaymentStage {
    /// The order, once created
    #[must_use]
    pub const fn order(&self) -> Option<&Order> {
        match self {
            Self::CreatingOrder => None,
            Self::AwaitingPayment { order } | Self::Verifying { order } => Some(order),
        }
    }
}

/// Checkout screen
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Screen {
    /// Course list
    #[default]
    List,
    /// Details of one course, with the pay button
    Details {
        /// Selected course
        course: Course,
    },
    /// A payment attempt is in flight
    Paying {
        /// Course being bought
        course: Course,
        /// Attempt progress
        stage: PaymentStage,
    },
    /// Payment verified; course content is unlocked
    Unlocked {
        /// Purchased course
        course: Course,
        /// Whether the success celebration is still showing
        celebrating: bool,
    },
}

impl Screen {
    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Details { .. } => "details",
            Self::Paying { .. } => "paying",
            Self::Unlocked { .. } => "unlocked",
        }
    }

    /// The course on screen, if any
    #[must_use]
    pub const fn course(&self) -> Option<&Course> {
        match self {
            Self::List => None,
            Self::Details { course } | Self::Paying { course, .. } | Self::Unlocked { course, .. } => {
                Some(course)
            },
        }
    }
}

/// User-facing message shown after a failed step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Selected id is not in the catalog
    CourseNotFound,
    /// Order creation failed
    PaymentInitFailed,
    /// Signature verification did not succeed
    PaymentFailed,
    /// Hosted checkout was closed without paying
    PaymentCancelled,
}

impl Notice {
    /// Text shown to the buyer
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::CourseNotFound => "Course not found",
            Self::PaymentInitFailed => "Payment init failed",
            Self::PaymentFailed => "Payment failed",
            Self::PaymentCancelled => "Payment cancelled",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Checkout state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckoutState {
    /// Current screen
    pub screen: Screen,
    /// Message from the last failed step, cleared on the next transition
    pub notice: Option<Notice>,
}

impl CheckoutState {
    /// Creates a state on the course list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a payment attempt is in flight (pay button disabled)
    #[must_use]
    pub const fn is_paying(&self) -> bool {
        matches!(self.screen, Screen::Paying { .. })
    }

    /// Whether the selected course has been unlocked
    #[must_use]
    pub const fn is_unlocked(&self) -> bool {
        matches!(self.screen, Screen::Unlocked { .. })
    }

    /// Content to reveal, only once the course on screen is unlocked
    #[must_use]
    pub fn unlocked_asset(&self) -> Option<&str> {
        match &self.screen {
            Screen::Unlocked { course, .. } => course.unlock_asset.as_deref(),
            _ => None,
        }
    }
}

/// Outcome of a signature verification as reported by the order service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Signature matched
    Success,
    /// Anything other than success
    Failed,
}

/// Theme passed to the hosted checkout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Accent colour, e.g. `#7c3aed`
    pub color: String,
}

/// Options handed to the gateway's hosted checkout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    /// Public key id (never the secret)
    pub key: String,
    /// Amount in minor units, taken from the order
    pub amount: u64,
    /// Currency code
    pub currency: String,
    /// Merchant name
    pub name: String,
    /// Course name
    pub description: String,
    /// Gateway order id
    pub order_id: String,
    /// Widget theme
    pub theme: Theme,
}

/// What the hosted checkout reports back
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetOutcome {
    /// Buyer paid; the widget produced a signed callback
    Authorized(PaymentCallback),
    /// Widget closed without paying
    Dismissed,
}

/// Checkout actions
///
/// User intents come from the view; the rest are fed back by effects.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckoutAction {
    /// Open the details of a course
    SelectCourse {
        /// Course to show
        course_id: CourseId,
    },
    /// Navigate back one screen
    Back,
    /// Start a payment for the course on screen
    Pay,
    /// Order service minted an order
    OrderCreated {
        /// The gateway order
        order: Order,
    },
    /// Order creation failed
    OrderFailed {
        /// Failure description (logs only)
        reason: String,
    },
    /// Hosted checkout reported a completed payment
    PaymentAuthorized {
        /// Gateway payment id
        payment_id: String,
        /// Callback signature
        signature: String,
    },
    /// Hosted checkout was closed without paying
    CheckoutDismissed,
    /// Order service answered the verification request
    PaymentVerified {
        /// Verification outcome
        status: VerificationStatus,
    },
    /// Verification request could not be completed
    VerificationFailed {
        /// Failure description (logs only)
        reason: String,
    },
    /// Success celebration timer elapsed
    CelebrationFinished,
    /// Clear the current notice
    DismissNotice,
}
