pub mod configuration;

pub mod markup {
    pub mod configurationerror;
    pub mod breakpoint;
    pub mod markuptable;
    pub mod cachebackend;
    pub mod markupcache;
    pub mod markupadmin;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod point2d;
        pub mod piecewiselinear;
    }
    pub mod round;
}

pub mod pricing {
    pub mod partquote;
}

pub mod store {
    pub mod storeerror;
    pub mod markuprow;
    pub mod markupsource;
    pub mod markupstore;
}
