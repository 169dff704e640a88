//! reqwest-based implementation of the backend collaborator, plus typed
//! accessors for every server resource.
//!
//! Once the session store records a bearer token via
//! [`Backend::set_bearer`], it is attached to all subsequent requests.

use std::sync::RwLock;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use campus_core::profile::Profile;
use campus_core::registration::RegistrationRequest;
use campus_core::roles::Role;
use campus_core::types::DbId;

use crate::backend::{AuthTokens, Backend};
use crate::error::ClientError;
use crate::wire::{
    self, AttendanceEdit, AttendanceRecord, AuthPayload, Data, FeeRecord, FeeSubmission,
    MarkEdit, MarkRecord, MaterialRecord, MaterialSubmission, NewAttendance, NewMark, NewUser,
    SalaryRecord, SalarySubmission, UserEdit,
};

/// HTTP client for the campus API.
pub struct HttpBackend {
    base_url: String,
    http: reqwest::Client,
    bearer: RwLock<Option<String>>,
}

impl HttpBackend {
    /// Create a client targeting `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            bearer: RwLock::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    /// Attach the recorded bearer token, if any.
    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.bearer.read().expect("bearer lock poisoned").as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.authed(self.http.get(self.url(path))).send().await?;
        wire::expect_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .authed(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        wire::expect_json(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .authed(self.http.put(self.url(path)))
            .json(body)
            .send()
            .await?;
        wire::expect_json(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.authed(self.http.delete(self.url(path))).send().await?;
        wire::expect_ok(response).await
    }

    // -----------------------------------------------------------------------
    // Users & approvals
    // -----------------------------------------------------------------------

    /// List all users (admin).
    pub async fn list_users(&self) -> Result<Vec<Profile>, ClientError> {
        self.get_json("/users").await
    }

    /// List registrations awaiting approval (admin).
    pub async fn pending_users(&self) -> Result<Vec<Profile>, ClientError> {
        self.get_json("/users/pending").await
    }

    /// Fetch one user (admin).
    pub async fn get_user(&self, id: DbId) -> Result<Profile, ClientError> {
        self.get_json(&format!("/users/{id}")).await
    }

    /// Create a pre-approved user (admin).
    pub async fn create_user(&self, user: &NewUser) -> Result<Profile, ClientError> {
        self.post_json("/users", user).await
    }

    /// Replace a user's editable fields (admin).
    pub async fn update_user(&self, id: DbId, edit: &UserEdit) -> Result<Profile, ClientError> {
        self.put_json(&format!("/users/{id}"), edit).await
    }

    /// Delete a user (admin).
    pub async fn delete_user(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/users/{id}")).await
    }

    /// Approve a pending registration, assigning `role` (admin).
    pub async fn approve_user(&self, id: DbId, role: Role) -> Result<Profile, ClientError> {
        #[derive(Serialize)]
        struct Body {
            role: Role,
        }
        self.post_json(&format!("/users/{id}/approve"), &Body { role })
            .await
    }

    // -----------------------------------------------------------------------
    // Attendance
    // -----------------------------------------------------------------------

    /// List attendance visible to the current user.
    pub async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, ClientError> {
        Ok(self
            .get_json::<Data<Vec<AttendanceRecord>>>("/attendance")
            .await?
            .data)
    }

    /// Record attendance (admin).
    pub async fn record_attendance(
        &self,
        entry: &NewAttendance,
    ) -> Result<AttendanceRecord, ClientError> {
        Ok(self
            .post_json::<_, Data<AttendanceRecord>>("/attendance", entry)
            .await?
            .data)
    }

    /// Correct an attendance row (admin).
    pub async fn update_attendance(
        &self,
        id: DbId,
        edit: &AttendanceEdit,
    ) -> Result<AttendanceRecord, ClientError> {
        Ok(self
            .put_json::<_, Data<AttendanceRecord>>(&format!("/attendance/{id}"), edit)
            .await?
            .data)
    }

    /// Remove an attendance row (admin).
    pub async fn delete_attendance(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/attendance/{id}")).await
    }

    // -----------------------------------------------------------------------
    // Marks
    // -----------------------------------------------------------------------

    /// List marks visible to the current user.
    pub async fn list_marks(&self) -> Result<Vec<MarkRecord>, ClientError> {
        Ok(self.get_json::<Data<Vec<MarkRecord>>>("/marks").await?.data)
    }

    /// Enter marks for a student (staff).
    pub async fn enter_mark(&self, entry: &NewMark) -> Result<MarkRecord, ClientError> {
        Ok(self
            .post_json::<_, Data<MarkRecord>>("/marks", entry)
            .await?
            .data)
    }

    /// Correct a marks row (staff).
    pub async fn update_mark(&self, id: DbId, edit: &MarkEdit) -> Result<MarkRecord, ClientError> {
        Ok(self
            .put_json::<_, Data<MarkRecord>>(&format!("/marks/{id}"), edit)
            .await?
            .data)
    }

    /// Remove a marks row (staff).
    pub async fn delete_mark(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/marks/{id}")).await
    }

    // -----------------------------------------------------------------------
    // Study materials
    // -----------------------------------------------------------------------

    /// List study materials.
    pub async fn list_materials(&self) -> Result<Vec<MaterialRecord>, ClientError> {
        Ok(self
            .get_json::<Data<Vec<MaterialRecord>>>("/materials")
            .await?
            .data)
    }

    /// Publish a study material, optionally attaching a document (staff).
    pub async fn publish_material(
        &self,
        submission: MaterialSubmission,
    ) -> Result<MaterialRecord, ClientError> {
        let mut form = reqwest::multipart::Form::new().text("title", submission.title);
        if let Some(description) = submission.description {
            form = form.text("description", description);
        }
        if let Some(upload) = submission.file {
            form = form.part(
                "file",
                reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name),
            );
        }

        let response = self
            .authed(self.http.post(self.url("/materials")))
            .multipart(form)
            .send()
            .await?;
        Ok(wire::expect_json::<Data<MaterialRecord>>(response)
            .await?
            .data)
    }

    /// Remove a study material (staff).
    pub async fn delete_material(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/materials/{id}")).await
    }

    // -----------------------------------------------------------------------
    // Fees
    // -----------------------------------------------------------------------

    /// List all fee records (admin).
    pub async fn list_fees(&self) -> Result<Vec<FeeRecord>, ClientError> {
        Ok(self.get_json::<Data<Vec<FeeRecord>>>("/fees").await?.data)
    }

    /// List one student's fee records (owner or admin).
    pub async fn fees_for_student(&self, student_id: DbId) -> Result<Vec<FeeRecord>, ClientError> {
        Ok(self
            .get_json::<Data<Vec<FeeRecord>>>(&format!("/fees/student/{student_id}"))
            .await?
            .data)
    }

    /// Create a fee record (admin).
    pub async fn create_fee(&self, submission: FeeSubmission) -> Result<FeeRecord, ClientError> {
        let response = self
            .authed(self.http.post(self.url("/fees")))
            .multipart(fee_form(submission))
            .send()
            .await?;
        Ok(wire::expect_json::<Data<FeeRecord>>(response).await?.data)
    }

    /// Update a fee record (admin).
    pub async fn update_fee(
        &self,
        id: DbId,
        submission: FeeSubmission,
    ) -> Result<FeeRecord, ClientError> {
        let response = self
            .authed(self.http.put(self.url(&format!("/fees/{id}"))))
            .multipart(fee_form(submission))
            .send()
            .await?;
        Ok(wire::expect_json::<Data<FeeRecord>>(response).await?.data)
    }

    /// Remove a fee record (admin).
    pub async fn delete_fee(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/fees/{id}")).await
    }

    // -----------------------------------------------------------------------
    // Salaries
    // -----------------------------------------------------------------------

    /// List all salary records (admin).
    pub async fn list_salaries(&self) -> Result<Vec<SalaryRecord>, ClientError> {
        Ok(self
            .get_json::<Data<Vec<SalaryRecord>>>("/salaries")
            .await?
            .data)
    }

    /// List one teacher's salary records (owner or admin).
    pub async fn salaries_for_teacher(
        &self,
        teacher_id: DbId,
    ) -> Result<Vec<SalaryRecord>, ClientError> {
        Ok(self
            .get_json::<Data<Vec<SalaryRecord>>>(&format!("/salaries/teacher/{teacher_id}"))
            .await?
            .data)
    }

    /// Create a salary record (admin).
    pub async fn create_salary(
        &self,
        submission: SalarySubmission,
    ) -> Result<SalaryRecord, ClientError> {
        let response = self
            .authed(self.http.post(self.url("/salaries")))
            .multipart(salary_form(submission))
            .send()
            .await?;
        Ok(wire::expect_json::<Data<SalaryRecord>>(response).await?.data)
    }

    /// Update a salary record (admin).
    pub async fn update_salary(
        &self,
        id: DbId,
        submission: SalarySubmission,
    ) -> Result<SalaryRecord, ClientError> {
        let response = self
            .authed(self.http.put(self.url(&format!("/salaries/{id}"))))
            .multipart(salary_form(submission))
            .send()
            .await?;
        Ok(wire::expect_json::<Data<SalaryRecord>>(response).await?.data)
    }

    /// Remove a salary record (admin).
    pub async fn delete_salary(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/salaries/{id}")).await
    }

    // -----------------------------------------------------------------------
    // Stored documents
    // -----------------------------------------------------------------------

    /// Download a stored document (challan, slip, material) by reference.
    pub async fn download_file(&self, name: &str) -> Result<Vec<u8>, ClientError> {
        let response = self
            .authed(self.http.get(self.url(&format!("/files/{name}"))))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(wire::decode_error(response).await)
        }
    }
}

/// Encode a fee submission as a multipart form.
fn fee_form(submission: FeeSubmission) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    if let Some(student_id) = submission.student_id {
        form = form.text("student_id", student_id.to_string());
    }
    if let Some(amount) = submission.amount {
        form = form.text("amount", amount.to_string());
    }
    if let Some(due_date) = submission.due_date {
        form = form.text("due_date", due_date.format("%Y-%m-%d").to_string());
    }
    if let Some(status) = submission.status {
        form = form.text("status", status);
    }
    if let Some(upload) = submission.challan {
        form = form.part(
            "file",
            reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name),
        );
    }
    form
}

/// Encode a salary submission as a multipart form.
fn salary_form(submission: SalarySubmission) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    if let Some(teacher_id) = submission.teacher_id {
        form = form.text("teacher_id", teacher_id.to_string());
    }
    if let Some(month) = submission.month {
        form = form.text("month", month);
    }
    if let Some(amount) = submission.amount {
        form = form.text("amount", amount.to_string());
    }
    if let Some(status) = submission.status {
        form = form.text("status", status);
    }
    if let Some(upload) = submission.slip {
        form = form.part(
            "file",
            reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name),
        );
    }
    form
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ClientError> {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
            password: &'a str,
        }
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&Body { email, password })
            .send()
            .await?;
        let payload: AuthPayload = wire::expect_json(response).await?;
        Ok(payload.into())
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<Profile, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(request)
            .send()
            .await?;
        wire::expect_json(response).await
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<Profile, ClientError> {
        let response = self
            .http
            .get(self.url("/auth/me"))
            .bearer_auth(access_token)
            .send()
            .await?;
        wire::expect_json(response).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, ClientError> {
        #[derive(Serialize)]
        struct Body<'a> {
            refresh_token: &'a str,
        }
        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&Body { refresh_token })
            .send()
            .await?;
        let payload: AuthPayload = wire::expect_json(response).await?;
        Ok(payload.into())
    }

    async fn invalidate(&self, access_token: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/auth/logout"))
            .bearer_auth(access_token)
            .send()
            .await?;
        wire::expect_ok(response).await
    }

    fn set_bearer(&self, token: Option<String>) {
        *self.bearer.write().expect("bearer lock poisoned") = token;
    }
}
