pub const TYPE_DEFS: &str = r#"
type Course {
    code: Int!
    name: String!
    credits: Int!
    professor: String!
}
input CourseInput {
    name: String!
    credits: Int!
    professor: String!
}
"#;

pub const QUERIES: &str = r#"
    allCourses: [Course]!
    courseByCode(code: Int!): Course!
"#;

pub const MUTATIONS: &str = r#"
    createCourse(course: CourseInput!): Course!
    deleteCourse(code: Int!): Int
    updateCourse(code: Int!, course: CourseInput!): Course!
"#;
