pub mod configuration;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod units {
    pub mod value;
    pub mod quantity;
}

pub mod math {
    pub mod domain;
    pub mod point;
    pub mod interval;
    pub mod interpolator;

    pub mod function {
        pub mod matherror;
        pub mod function;
        pub mod primitive;
        pub mod combination;
        pub mod functionchecker;
        pub mod functionmanager;

        pub mod primitivefunctions {
            pub mod constantfunction;
            pub mod unilinearfunction;
            pub mod bilinearfunction;
            pub mod unireciprocalfunction;
            pub mod boxcarfunction;
            pub mod gaussfunction;
            pub mod sawtoothfunction;
            pub mod interpolated1dfunction;
            pub mod periodicallyinterpolated1dfunction;
            pub mod periodicallyinterpolated2dfunction;
        }

        pub mod algebraicoperations {
            pub mod addedfunction;
            pub mod subtractedfunction;
            pub mod multipliedfunction;
            pub mod dividedfunction;
            pub mod summedfunction;
        }

        pub mod compoundfunctions {
            pub mod cachebackend;
            pub mod memoizedfunction;
            pub mod domainlimitedfunction;
            pub mod domainshiftedfunction;
            pub mod combined2dfunction;
            pub mod domainmodulated2dfunction;
            pub mod extruded2dfunction;
            pub mod curriedfunction;
            pub mod rasterized2dfunction;
            pub mod approximatedfunction;
            pub mod integratedfunction;
        }
    }
}
