//! Login / signup form state.

/// Which form is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign in",
            AuthMode::Signup => "Create account",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Email,
    Password,
}

/// Auth screen form.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub field: AuthField,
    pub email: String,
    pub password: String,
    /// Error shown under the form
    pub error: Option<String>,
    /// Non-error notice, e.g. after signing up
    pub notice: Option<String>,
    /// A request is in flight
    pub submitting: bool,
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.password.clear();
        self.error = None;
        self.notice = None;
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    fn current_mut(&mut self) -> &mut String {
        match self.field {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.current_mut().push(c);
    }

    pub fn insert_str(&mut self, text: &str) {
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        self.current_mut().push_str(&text);
    }

    pub fn backspace(&mut self) {
        self.current_mut().pop();
    }

    /// Password as shown on screen
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    /// Trimmed email and password, or the message to show
    pub fn validate(&self) -> Result<(String, String), String> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err("Email is required".to_string());
        }
        if !email.contains('@') {
            return Err("Enter a valid email address".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok((email.to_string(), self.password.clone()))
    }

    /// Mark the form as submitting; returns the fields to send
    pub fn begin_submit(&mut self) -> Option<(AuthMode, String, String)> {
        if self.submitting {
            return None;
        }
        match self.validate() {
            Ok((email, password)) => {
                self.error = None;
                self.notice = None;
                self.submitting = true;
                Some((self.mode, email, password))
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }

    /// After signup: back to login with the email kept
    pub fn signed_up(&mut self, email: &str) {
        self.submitting = false;
        self.mode = AuthMode::Login;
        self.email = email.to_string();
        self.password.clear();
        self.field = AuthField::Password;
        self.error = None;
        self.notice = Some("Account created. Sign in to continue.".to_string());
    }

    /// Clear after a successful login
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
