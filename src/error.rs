use thiserror::Error;

use crate::{http::error::HttpError, minecraft::error::MinecraftError, util::error::UtilError};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Minecraft(#[from] MinecraftError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Util(#[from] UtilError),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
