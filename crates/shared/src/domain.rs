use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);
id_newtype!(SpaceId);
id_newtype!(ArticleId);
id_newtype!(ArticleTypeId);
id_newtype!(ArticleTagId);
id_newtype!(CommentId);
