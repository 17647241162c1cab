pub mod ls_sampler;
pub mod uniform_sampler;
pub mod visiting_distr;
