use std::sync::Arc;

use infra::{BackendEndpoint, HttpClient};
use serde_json::Value;

use super::types::{MUTATIONS, QUERIES, TYPE_DEFS};
use crate::gql::domains::{bind, DomainModule, RestBackend};
use crate::gql::error::ResolveError;
use crate::gql::resolver::{ResolverFragment, ResolverInput};

pub struct CoursesModule {
    backend: Arc<RestBackend>,
}

impl CoursesModule {
    pub fn new(endpoint: &BackendEndpoint, client: HttpClient) -> Self {
        Self {
            backend: RestBackend::new(endpoint, client),
        }
    }
}

impl DomainModule for CoursesModule {
    fn name(&self) -> &'static str {
        "courses"
    }

    fn type_defs(&self) -> &'static str {
        TYPE_DEFS
    }

    fn queries(&self) -> &'static str {
        QUERIES
    }

    fn mutations(&self) -> &'static str {
        MUTATIONS
    }

    fn resolvers(&self) -> ResolverFragment {
        let b = &self.backend;
        ResolverFragment::new(self.name())
            .query("allCourses", bind(b, all_courses))
            .query("courseByCode", bind(b, course_by_code))
            .mutation("createCourse", bind(b, create_course))
            .mutation("updateCourse", bind(b, update_course))
            .mutation("deleteCourse", bind(b, delete_course))
    }
}

async fn all_courses(backend: Arc<RestBackend>, input: ResolverInput) -> Result<Value, ResolveError> {
    backend.list("", &input).await
}

async fn course_by_code(
    backend: Arc<RestBackend>,
    input: ResolverInput,
) -> Result<Value, ResolveError> {
    let code = input.key("code")?;
    backend.fetch(&code, &input).await
}

async fn create_course(
    backend: Arc<RestBackend>,
    input: ResolverInput,
) -> Result<Value, ResolveError> {
    let course = input.arg("course")?;
    backend.create("", Some(course), &input).await
}

async fn update_course(
    backend: Arc<RestBackend>,
    input: ResolverInput,
) -> Result<Value, ResolveError> {
    let code = input.key("code")?;
    let course = input.arg("course")?;
    backend.update(&code, Some(course), &input).await
}

async fn delete_course(
    backend: Arc<RestBackend>,
    input: ResolverInput,
) -> Result<Value, ResolveError> {
    let code = input.key("code")?;
    backend.delete(&code, &input).await
}
