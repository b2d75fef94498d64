pub const TYPE_DEFS: &str = r#"
input User {
    name: String!
    email: String!
}
input UserTopic {
    user_id: Int!
    topic_id: Int!
}
input InNewsletter {
    title: String!
    description: String!
    url_to_image: String!
    topics: [Int!]
}
type UserCreated {
    id: Int
    name: String!
    email: String!
    created_at: String!
    updated_at: String!
    url: String!
}
type UserTopicCreated {
    user_id: Int
    topic_id: Int
}
type Newsletter {
    title: String!
    description: String!
    url_to_image: String!
    topics: [Topic!]
}
type Topic {
    name: String!
    img_id: Int!
}
"#;

pub const QUERIES: &str = r#"
    allNewsletters: [Newsletter]!
    allTopics: [Topic]!
"#;

pub const MUTATIONS: &str = r#"
    saveUser(user: User!): UserCreated!
    saveUserTopic(userTopic: UserTopic!): UserTopicCreated!
    saveNewsletter(newsletter: InNewsletter!): Newsletter!
"#;
