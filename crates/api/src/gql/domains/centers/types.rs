pub const TYPE_DEFS: &str = r#"
input Center {
    name: String!
    email: String
    city: String!
    address: String!
    lat: Float!
    lng: Float!
}
type CenterCreated {
    code: Int!
    name: String!
    email: String
    city: String!
    address: String!
    lat: Float!
    lng: Float!
}
"#;

pub const QUERIES: &str = r#"
    allCenters: [CenterCreated]!
    centerById(code: Int!): CenterCreated
"#;

pub const MUTATIONS: &str = r#"
    saveCenter(center: Center!): CenterCreated!
"#;
